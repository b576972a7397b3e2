use crate::{
    art::palette::{self, BUBBLE_PALETTE},
    graphics::{Argb, Canvas, Pixel},
    math::{rng::RandomSource, Vec2},
};

pub const OVERLAY_SIZE: usize = 500;

pub const SPAWN_X: (f32, f32) = (100.0, 400.0);
pub const SPAWN_Y: (f32, f32) = (350.0, 500.0);
pub const SPAWN_SIZE: (f32, f32) = (10.0, 30.0);

pub const START_OPACITY: i32 = 255;
pub const RISE_PER_TICK: f32 = 1.0;
pub const FADE_PER_TICK: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bubble {
    pub pos: Vec2,
    pub size: f32,
    pub opacity: i32,
    pub color: Argb,
}

impl Bubble {
    pub fn random(rng: &mut dyn RandomSource) -> Self {
        let x = rng.range(SPAWN_X.0, SPAWN_X.1);
        let y = rng.range(SPAWN_Y.0, SPAWN_Y.1);
        let size = rng.range(SPAWN_SIZE.0, SPAWN_SIZE.1);

        Self {
            pos: Vec2::new(x, y),
            size,
            opacity: START_OPACITY,
            color: palette::pick(&BUBBLE_PALETTE, rng),
        }
    }

    fn step(&mut self) {
        self.pos.y -= RISE_PER_TICK;
        self.opacity -= FADE_PER_TICK;
    }

    fn draw(&self, canvas: &mut Canvas) {
        let alpha = self.opacity.clamp(0, 255) as u8;

        if alpha == 0 {
            return;
        }

        canvas.draw_circle_by(
            self.pos.x,
            self.pos.y,
            self.size,
            self.color.set_alpha(alpha),
            Argb::mix,
        );
    }

    pub fn is_faded(&self) -> bool {
        self.opacity <= 0
    }
}

/// The live bubbles of the overlay.
///
/// Only [`Bubbles::spawn`] and [`Bubbles::tick`] change the list.
#[derive(Debug, Default)]
pub struct Bubbles {
    list: Vec<Bubble>,
}

impl Bubbles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, n: usize, rng: &mut dyn RandomSource) {
        self.list.reserve(n);
        self.list.extend((0..n).map(|_| Bubble::random(rng)));
    }

    /// Advances, draws and culls every bubble, last one first.
    ///
    /// A bubble is drawn on the frame its opacity runs out and removed
    /// right after.
    pub fn tick(&mut self, canvas: &mut Canvas) {
        for i in (0..self.list.len()).rev() {
            let bubble = &mut self.list[i];

            bubble.step();
            bubble.draw(canvas);

            if bubble.is_faded() {
                self.list.remove(i);
            }
        }
    }

    pub fn clear(&mut self) {
        self.list.clear();
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &Bubble> {
        self.list.iter()
    }
}
