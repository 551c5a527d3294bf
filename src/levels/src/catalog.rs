//! Fixed per-theme level catalogs.

use theme::Theme;

pub const LEVELS_PER_THEME: u32 = 16;

/// Static name/description pair for one catalog slot.
pub struct LevelDef {
    pub name: &'static str,
    pub description: &'static str,
}

pub fn catalog_for(theme: Theme) -> &'static [LevelDef] {
    match theme {
        Theme::Mario => MARIO_LEVELS,
        Theme::Zelda => ZELDA_LEVELS,
        Theme::Dkc => DKC_LEVELS,
    }
}

const MARIO_LEVELS: &[LevelDef] = &[
    LevelDef { name: "World 1-1", description: "A sunny stroll through the Mushroom Kingdom." },
    LevelDef { name: "World 1-2", description: "Underground pipes and hidden coin rooms." },
    LevelDef { name: "World 2-1", description: "Rolling hills patrolled by Koopa Troopas." },
    LevelDef { name: "World 2-2", description: "A swim through Cheep Cheep waters." },
    LevelDef { name: "World 3-1", description: "Night falls over the treetop platforms." },
    LevelDef { name: "World 3-2", description: "A dash across the open plains." },
    LevelDef { name: "World 4-1", description: "Lakitu rains Spinies from above." },
    LevelDef { name: "World 4-2", description: "A maze of warp pipes below ground." },
    LevelDef { name: "World 5-1", description: "Bullet Bills streak across the sky." },
    LevelDef { name: "World 5-2", description: "Springboards over bottomless pits." },
    LevelDef { name: "World 6-1", description: "Icy ledges demand careful footing." },
    LevelDef { name: "World 6-2", description: "Pipes upon pipes, and Piranha Plants." },
    LevelDef { name: "World 7-1", description: "Hammer Bros guard the high road." },
    LevelDef { name: "World 7-2", description: "A second swim, deeper and darker." },
    LevelDef { name: "World 8-1", description: "The longest march to the castle gates." },
    LevelDef { name: "World 8-2", description: "Bowser's keep, lava and all." },
];

const ZELDA_LEVELS: &[LevelDef] = &[
    LevelDef { name: "Kokiri Forest", description: "Where every journey begins." },
    LevelDef { name: "Inside the Deku Tree", description: "Webs and Skulltulas in the great tree." },
    LevelDef { name: "Hyrule Field", description: "The wide green heart of Hyrule." },
    LevelDef { name: "Lon Lon Ranch", description: "Horses, cuccos and a song." },
    LevelDef { name: "Kakariko Village", description: "A quiet village beneath the mountain." },
    LevelDef { name: "Death Mountain Trail", description: "Boulders tumble down the volcano path." },
    LevelDef { name: "Dodongo's Cavern", description: "Bombs open the way through stone." },
    LevelDef { name: "Zora's Domain", description: "Waterfalls and the Zora king's hall." },
    LevelDef { name: "Jabu-Jabu's Belly", description: "A dungeon inside a deity." },
    LevelDef { name: "Lost Woods", description: "Follow the music or wander forever." },
    LevelDef { name: "Forest Temple", description: "Twisted corridors and four ghostly flames." },
    LevelDef { name: "Fire Temple", description: "A prison of lava beneath the crater." },
    LevelDef { name: "Water Temple", description: "Raise and lower the water, again." },
    LevelDef { name: "Shadow Temple", description: "What lurks beneath the well." },
    LevelDef { name: "Spirit Temple", description: "A colossus guards the desert's secret." },
    LevelDef { name: "Ganon's Castle", description: "Six barriers, then the final stand." },
];

const DKC_LEVELS: &[LevelDef] = &[
    LevelDef { name: "Jungle Hijinxs", description: "Swing out of the treehouse and into the jungle." },
    LevelDef { name: "Ropey Rampage", description: "Storm-lashed ropes over the gorge." },
    LevelDef { name: "Reptile Rumble", description: "Slippy caves full of Slippas." },
    LevelDef { name: "Coral Capers", description: "A swim through the coral reef." },
    LevelDef { name: "Barrel Cannon Canyon", description: "Blast from barrel to barrel." },
    LevelDef { name: "Winky's Walkway", description: "A short ride on a big frog." },
    LevelDef { name: "Mine Cart Carnage", description: "Hold on, the track is out." },
    LevelDef { name: "Bouncy Bonanza", description: "Tires and tunnels in the dark." },
    LevelDef { name: "Stop & Go Station", description: "Move on green, freeze on red." },
    LevelDef { name: "Millstone Mayhem", description: "Gnawty wheels grind through the ruins." },
    LevelDef { name: "Vulture Culture", description: "Neckys drop more than feathers." },
    LevelDef { name: "Tree Top Town", description: "Barrel cannons over the canopy." },
    LevelDef { name: "Forest Frenzy", description: "A long rope ride through the pines." },
    LevelDef { name: "Temple Tempest", description: "Outrun the rolling millstones." },
    LevelDef { name: "Orang-utan Gang", description: "Manky Kongs hurl barrels downhill." },
    LevelDef { name: "Clam City", description: "Clambo spits pearls in the deep." },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_theme_has_a_full_catalog() {
        for theme in Theme::ALL {
            assert_eq!(catalog_for(theme).len(), LEVELS_PER_THEME as usize);
        }
    }
}
