use super::Pixel;

pub type Argb = u32;

pub type Mixer = fn(Argb, Argb) -> Argb;

/// Source-over compositing of `c2` onto `c1`.
pub fn composite_u32(c1: Argb, c2: Argb) -> Argb {
    let [a1, r1, g1, b1] = c1.decompose();
    let [a2, r2, g2, b2] = c2.decompose();

    if a2 == 0xFF {
        return c2;
    }

    if a2 == 0 {
        return c1;
    }

    let (a, a3) = {
        let a1 = a1 as u16;
        let a2 = a2 as u16;

        let a3 = (a1 * (255 - a2)) / 255;

        (a2 + a3, a3)
    };

    if a == 0 {
        return Argb::trans();
    }

    let composite_channel = |c1: u8, c2: u8| -> u8 {
        let c1 = c1 as u16;
        let c2 = c2 as u16;
        let a2 = a2 as u16;

        ((c2 * a2 + c1 * a3) / a) as u8
    };

    Argb::compose([
        a as u8,
        composite_channel(r1, r2),
        composite_channel(g1, g2),
        composite_channel(b1, b2),
    ])
}

impl Pixel for Argb {
    #[cfg(test)]
    fn black() -> Argb {
        0xFF_00_00_00
    }

    #[cfg(test)]
    fn white() -> Argb {
        0xFF_FF_FF_FF
    }

    fn trans() -> Argb {
        0x0
    }

    fn over(self, other: Argb) -> Argb {
        other
    }

    fn mix(self, other: Argb) -> Argb {
        composite_u32(self, other)
    }

    fn set_alpha(self, alpha: u8) -> Argb {
        (self & 0x00_FF_FF_FF) | (alpha as Argb) << 24
    }

    #[cfg(test)]
    fn alpha(self) -> u8 {
        self.decompose()[0]
    }

    fn decompose(self) -> [u8; 4] {
        self.to_be_bytes()
    }

    fn compose(array: [u8; 4]) -> Argb {
        Argb::from_be_bytes(array)
    }

    fn to_rgba(self) -> [u8; 4] {
        let [a, r, g, b] = self.decompose();
        [r, g, b, a]
    }
}
