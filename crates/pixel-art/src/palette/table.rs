//! The map color table.
//!
//! Slots 0..32 form the base palette, 32..48 extend it to 48 colors and
//! 48..64 to 64 colors. Never reorder or edit existing slots: tiles already
//! processed with a smaller palette must keep their colors when a larger one
//! is selected.

use crate::color::Rgb;

/// All 64 map colors, ordered by palette tier.
pub static MAP_PALETTE: [Rgb; 64] = [
    // --- 32-color base ---
    // ground and foliage
    Rgb::from_hex(0x7CA84A), // grass (render background)
    Rgb::from_hex(0x6A9A40), // grass base
    Rgb::from_hex(0x8CB85A), // grass light
    Rgb::from_hex(0x5A8535), // grass dark
    Rgb::from_hex(0x4A8035), // tree dark
    Rgb::from_hex(0x6AA04A), // tree light
    Rgb::from_hex(0x6A4A30), // trunk
    // buildings: wall / roof pairs
    Rgb::from_hex(0xE8C090), // university wall
    Rgb::from_hex(0xA06030), // university roof
    Rgb::from_hex(0xF0D8B0), // library wall
    Rgb::from_hex(0x786048), // library roof
    Rgb::from_hex(0xA8A8B0), // stadium wall
    Rgb::from_hex(0x30A030), // stadium roof
    Rgb::from_hex(0xE8D0A8), // residential wall
    Rgb::from_hex(0xB84838), // residential roof
    Rgb::from_hex(0xC8C8D0), // commercial wall
    Rgb::from_hex(0x4870A8), // commercial roof
    Rgb::from_hex(0xD8C0A0), // default wall
    Rgb::from_hex(0x907860), // default roof
    Rgb::from_hex(0x405060), // window
    Rgb::from_hex(0xFFE090), // lit window
    // lines, roads, water
    Rgb::from_hex(0x261F1A), // outline brown
    Rgb::from_hex(0x3C3C44), // asphalt dark
    Rgb::from_hex(0x606068), // asphalt
    Rgb::from_hex(0x8C8C94), // concrete
    Rgb::from_hex(0xB4B4BC), // sidewalk
    Rgb::from_hex(0xFFFFFF), // white
    Rgb::from_hex(0x4A90C8), // water
    Rgb::from_hex(0x2E5E8E), // deep water
    Rgb::from_hex(0x87CEEB), // sky
    Rgb::from_hex(0x1E2A1E), // shadow
    Rgb::from_hex(0x5A4A3A), // dirt path
    // --- 48-color extension ---
    Rgb::from_hex(0x5A9040), // tree medium
    Rgb::from_hex(0xA0C870), // sunlit grass
    Rgb::from_hex(0x3E6A2C), // deep foliage
    Rgb::from_hex(0xC8A070), // sand
    Rgb::from_hex(0xE0B070), // warm wall highlight
    Rgb::from_hex(0x8A5028), // roof shadow
    Rgb::from_hex(0xD06848), // roof highlight
    Rgb::from_hex(0x6890C0), // blue roof light
    Rgb::from_hex(0x304858), // window shadow
    Rgb::from_hex(0xFFF0C0), // lit window highlight
    Rgb::from_hex(0x707078), // road mid
    Rgb::from_hex(0x9CA0A8), // concrete light
    Rgb::from_hex(0xD8D8E0), // pale wall
    Rgb::from_hex(0x503828), // dark wood
    Rgb::from_hex(0xA89880), // gravel
    Rgb::from_hex(0x60A8D8), // shallow water
    // --- 64-color extension ---
    Rgb::from_hex(0xF0E8D8), // cream
    Rgb::from_hex(0xC05030), // brick
    Rgb::from_hex(0x984038), // brick dark
    Rgb::from_hex(0xB0C8A0), // pale sage
    Rgb::from_hex(0x78B050), // lawn
    Rgb::from_hex(0x486830), // hedge
    Rgb::from_hex(0xE8E0A0), // pale yellow
    Rgb::from_hex(0xC8B040), // ochre
    Rgb::from_hex(0xA83030), // red accent
    Rgb::from_hex(0x3060A0), // blue accent
    Rgb::from_hex(0x202830), // night blue
    Rgb::from_hex(0x505058), // dark gray
    Rgb::from_hex(0x7C7060), // taupe
    Rgb::from_hex(0xD0B898), // beige
    Rgb::from_hex(0x9098A8), // slate
    Rgb::from_hex(0xF8D878), // lamp glow
];
