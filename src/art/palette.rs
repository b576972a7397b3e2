use crate::{graphics::Argb, math::rng::RandomSource};

pub const WHITE: Argb = 0xFF_FF_FF_FF;
pub const BLACK: Argb = 0xFF_00_00_00;

pub const LAYOUT_PALETTE: [Argb; 8] = [
    0xFF_D4_09_20, // red
    0xFF_13_56_A2, // blue
    0xFF_F7_D8_42, // yellow
    0xFF_1C_1C_1C,
    0xFF_E9_6B_1F,
    0xFF_2A_9D_8F,
    0xFF_8E_44_AD,
    0xFF_B0_B0_B0,
];

pub const BUBBLE_PALETTE: [Argb; 7] = [
    0xFF_FF_6B_6B,
    0xFF_4E_CD_C4,
    0xFF_FF_E6_6D,
    0xFF_1A_73_E8,
    0xFF_F7_8F_B3,
    0xFF_95_E1_D3,
    0xFF_C3_9B_D3,
];

pub fn pick(palette: &[Argb], rng: &mut dyn RandomSource) -> Argb {
    palette[rng.index(palette.len())]
}
