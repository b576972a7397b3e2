pub mod config;
pub mod log;

use std::time::Instant;

use ::log::{debug, info};

use crate::{
    art::{
        bubbles::{Bubbles, OVERLAY_SIZE},
        layout::{self, Artwork},
        palette::LAYOUT_PALETTE,
        typewriter::{self, Typewriter},
    },
    graphics::{Argb, Canvas, P2},
    math::rng::{RandomSource, Rng},
    modes::Mode,
};

use config::Config;

pub const MAX_ART_SIZE: usize = 500;
pub const ART_VIEWPORT_RATIO: f32 = 0.8;

pub const BUBBLE_BATCH: usize = 10;

pub const TOP_MARGIN: i32 = 20;
pub const BUTTON_GAP: i32 = 20;
pub const BUTTON_W: i32 = 180;
pub const BUTTON_H: i32 = 44;
pub const BUTTON_OUTLINE: i32 = 3;

pub const BACKGROUND: Argb = 0xFF_F2_F2_F2;
pub const BUTTON_FACE: Argb = 0xFF_FF_FF_FF;
pub const BUTTON_INK: Argb = 0xFF_1C_1C_1C;

/// Side length of the artwork for a viewport `width` pixels wide.
pub fn art_size_for(width: usize) -> usize {
    ((width as f32 * ART_VIEWPORT_RATIO) as usize).min(MAX_ART_SIZE)
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Command {
    Regenerate,
    Resize(usize, usize),
    /// A press at a point of the frame.
    Click(i32, i32),
    Close,
}

impl Command {
    #[cfg(feature = "terminal")]
    pub fn is_close_requested(&self) -> bool {
        *self == Command::Close
    }
}

/// Owns everything that lives in the frame: the artwork, the bubble
/// overlay, the title and the frame buffer they are composed into.
///
/// All state changes go through [`Program::eval_command`],
/// [`Program::update`] and [`Program::render`], called from one thread.
pub(crate) struct Program {
    rng: Box<dyn RandomSource>,
    seed: u64,
    fps: u32,

    viewport: (usize, usize),

    art: Canvas,
    artwork: Option<Artwork>,

    overlay: Canvas,
    bubbles: Bubbles,

    typewriter: Typewriter,

    /// The composed frame.
    pub pix: Canvas,

    disposed: bool,
}

impl Program {
    pub fn new(config: &Config, now: Instant) -> Self {
        let seed = config.seed.unwrap_or_else(Rng::time_seed);
        let (w, h) = config.size;

        let mut prog = Self::with_rng(
            (w as usize, h as usize),
            Box::new(Rng::new(seed)),
            now,
        );

        prog.seed = seed;
        prog.fps = config.fps;
        prog
    }

    pub fn with_rng(viewport: (usize, usize), rng: Box<dyn RandomSource>, now: Instant) -> Self {
        let mut prog = Self {
            rng,
            seed: 0,
            fps: config::DEFAULT_FPS,

            viewport: (0, 0),

            art: Canvas::new(0, 0),
            artwork: None,

            overlay: Canvas::new(OVERLAY_SIZE, OVERLAY_SIZE),
            bubbles: Bubbles::new(),

            typewriter: Typewriter::start(
                typewriter::TITLE,
                typewriter::TYPING_SPEED,
                typewriter::TYPING_PAUSE,
                now,
            ),

            pix: Canvas::new(0, 0),

            disposed: false,
        };

        prog.update_size(viewport);
        prog
    }

    pub fn eval_command(&mut self, cmd: &Command) -> bool {
        if self.disposed {
            return false;
        }

        match *cmd {
            Command::Regenerate => {
                self.regenerate();
                true
            }

            Command::Resize(w, h) => {
                self.update_size((w, h));
                true
            }

            Command::Click(x, y) => {
                if !self.button_contains(P2(x, y)) {
                    return false;
                }

                self.regenerate();
                true
            }

            Command::Close => {
                self.dispose();
                false
            }
        }
    }

    #[cfg(any(test, feature = "terminal"))]
    pub fn eval_commands(&mut self, cmds: &mut Vec<Command>) -> bool {
        let mut redraw = false;
        for cmd in cmds.iter() {
            redraw |= self.eval_command(cmd);
        }
        cmds.clear();

        redraw
    }

    /// Repaints the artwork and releases a batch of bubbles.
    pub fn regenerate(&mut self) {
        self.redraw_layout();
        self.bubbles.spawn(BUBBLE_BATCH, self.rng.as_mut());
    }

    /// Throws the artwork canvas away and paints a fresh one.
    fn redraw_layout(&mut self) {
        let side = art_size_for(self.viewport.0);

        if side == 0 {
            debug!("Viewport too narrow for an artwork, skipping.");
            self.art = Canvas::new(0, 0);
            self.artwork = None;
            return;
        }

        let mut art = Canvas::new(side, side);
        let artwork = layout::generate(side, self.rng.as_mut());
        artwork.draw(&mut art);

        debug!(
            "New artwork: {side}x{side}, {} cells, {:.0}% white.",
            artwork.cell_count(),
            artwork.white_ratio() * 100.0
        );

        self.art = art;
        self.artwork = Some(artwork);
    }

    /// A new viewport size always means a new artwork.
    pub fn update_size(&mut self, (w, h): (usize, usize)) {
        self.viewport = (w, h);
        self.pix.resize(w, h);
        self.redraw_layout();
    }

    /// Advances the title. Returns whether it changed.
    pub fn update(&mut self, now: Instant) -> bool {
        if self.disposed {
            return false;
        }

        self.typewriter.poll(now)
    }

    /// Steps the bubbles and composes the frame. Runs every frame,
    /// whether or not there are bubbles.
    pub fn render(&mut self) {
        if self.disposed {
            return;
        }

        self.overlay.clear();
        self.bubbles.tick(&mut self.overlay);

        self.compose();
    }

    fn compose(&mut self) {
        self.pix.fill(BACKGROUND);

        self.pix.blit(&self.art, self.art_origin());
        self.pix.blit(&self.overlay, self.overlay_origin());

        self.draw_button();
    }

    pub fn art_origin(&self) -> P2 {
        let side = self.art.width() as i32;
        P2((self.viewport.0 as i32 - side) / 2, TOP_MARGIN)
    }

    /// The overlay is centered on the artwork.
    pub fn overlay_origin(&self) -> P2 {
        let P2(ax, ay) = self.art_origin();
        let half_art = self.art.width() as i32 / 2;
        let half_overlay = OVERLAY_SIZE as i32 / 2;

        P2(ax + half_art - half_overlay, ay + half_art - half_overlay)
    }

    /// Top left corner, width and height of the regenerate button.
    pub fn button_rect(&self) -> (P2, i32, i32) {
        let x = (self.viewport.0 as i32 - BUTTON_W) / 2;
        let y = TOP_MARGIN + self.art.height() as i32 + BUTTON_GAP;

        (P2(x, y), BUTTON_W, BUTTON_H)
    }

    pub fn button_contains(&self, p: P2) -> bool {
        let (P2(x, y), w, h) = self.button_rect();
        (x..x + w).contains(&p.0) && (y..y + h).contains(&p.1)
    }

    fn draw_button(&mut self) {
        let (p, w, h) = self.button_rect();
        let o = BUTTON_OUTLINE;

        self.pix.draw_rect_wh(p, w, h, BUTTON_INK);
        self.pix
            .draw_rect_wh(P2(p.0 + o, p.1 + o), w - 2 * o, h - 2 * o, BUTTON_FACE);

        // A little three-block composition as the button's label.
        let block = h / 2;
        let total = block * 3 + o * 2;
        let mut x = p.0 + (w - total) / 2;
        let y = p.1 + (h - block) / 2;

        for color in &LAYOUT_PALETTE[..3] {
            self.pix.draw_rect_wh(P2(x, y), block, block, *color);
            x += block + o;
        }
    }

    /// Stops the title and drops the bubbles. Nothing runs afterwards.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }

        self.typewriter.stop();
        self.bubbles.clear();
        self.disposed = true;

        info!("Shutting down.");
    }

    #[cfg(test)]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn title(&self) -> &str {
        self.typewriter.text()
    }

    pub fn art(&self) -> &Canvas {
        &self.art
    }

    pub fn artwork(&self) -> Option<&Artwork> {
        self.artwork.as_ref()
    }

    #[cfg(test)]
    pub fn bubbles(&self) -> &Bubbles {
        &self.bubbles
    }

    #[cfg(test)]
    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    pub fn viewport(&self) -> (usize, usize) {
        self.viewport
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// RGBA pixels of a small artwork, for the window icon.
    pub fn icon_rgba(&mut self, size: usize) -> (Vec<u8>, u32, u32) {
        let mut canvas = Canvas::new(MAX_ART_SIZE, MAX_ART_SIZE);
        layout::generate(MAX_ART_SIZE, self.rng.as_mut()).draw(&mut canvas);

        let icon = canvas.scaled_nearest(size, size);
        (icon.to_rgba_bytes(), size as u32, size as u32)
    }

    pub fn print_startup_info(&self, mode: &Mode) {
        info!(
            "Mondrian: {}x{} {}, artwork {}px with {} cells, {} fps, seed {}.",
            self.viewport.0,
            self.viewport.1,
            mode.get_name(),
            self.art.width(),
            self.artwork().map_or(0, Artwork::cell_count),
            self.fps,
            self.seed
        );

        if !mode.is_con() {
            info!("Click the button or press R / Space for a new composition.");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        art::{
            bubbles::{SPAWN_SIZE, SPAWN_X, SPAWN_Y},
            palette::WHITE,
        },
        graphics::Pixel,
        math::rng::Sequence,
    };

    fn program(width: usize) -> (Program, Instant) {
        let now = Instant::now();
        (Program::with_rng((width, 700), Box::new(Rng::new(1)), now), now)
    }

    #[test]
    fn art_size_follows_viewport() {
        assert_eq!(art_size_for(1000), 500);
        assert_eq!(art_size_for(625), 500);
        assert_eq!(art_size_for(400), 320);
        assert_eq!(art_size_for(1), 0);
    }

    #[test]
    fn setup_draws_artwork_without_bubbles() {
        let (prog, _) = program(600);

        assert_eq!(prog.art().sizeu(), (480, 480));
        assert!(prog.artwork().is_some());
        assert!(prog.bubbles().is_empty());
    }

    #[test]
    fn regenerate_replaces_art_and_spawns_ten() {
        let (mut prog, _) = program(800);
        let before = prog.artwork().unwrap().cuts().clone();

        assert!(prog.eval_command(&Command::Regenerate));
        assert_eq!(prog.bubbles().len(), 10);
        assert_ne!(prog.artwork().unwrap().cuts(), &before);

        prog.eval_command(&Command::Regenerate);
        assert_eq!(prog.bubbles().len(), 20);

        for b in prog.bubbles().iter() {
            assert!((SPAWN_X.0..=SPAWN_X.1).contains(&b.pos.x));
            assert!((SPAWN_Y.0..=SPAWN_Y.1).contains(&b.pos.y));
            assert!((SPAWN_SIZE.0..=SPAWN_SIZE.1).contains(&b.size));
        }
    }

    #[test]
    fn resize_recomputes_side_and_regenerates() {
        let (mut prog, _) = program(800);
        let before = prog.artwork().unwrap().cuts().clone();

        assert!(prog.eval_command(&Command::Resize(400, 600)));

        assert_eq!(prog.art().width(), 320);
        assert_eq!(prog.artwork().unwrap().size(), 320);
        assert_ne!(prog.artwork().unwrap().cuts(), &before);
        assert_eq!(prog.pix.sizeu(), (400, 600));

        // resizing alone does not release bubbles
        assert!(prog.bubbles().is_empty());
    }

    #[test]
    fn tiny_viewport_skips_the_artwork() {
        let (mut prog, _) = program(800);
        prog.eval_command(&Command::Resize(1, 1));

        assert!(prog.artwork().is_none());
        assert!(prog.art().is_empty());

        prog.eval_command(&Command::Regenerate);
        assert_eq!(prog.bubbles().len(), 10);
        prog.render();
    }

    #[test]
    fn click_hits_only_the_button() {
        let (mut prog, _) = program(600);
        let (P2(x, y), w, h) = prog.button_rect();

        assert!(!prog.eval_command(&Command::Click(x - 1, y)));
        assert!(!prog.eval_command(&Command::Click(x, y + h)));
        assert!(prog.bubbles().is_empty());

        assert!(prog.eval_command(&Command::Click(x + w / 2, y + h / 2)));
        assert_eq!(prog.bubbles().len(), 10);
    }

    #[test]
    fn overlay_lets_clicks_through_to_the_button() {
        let (mut prog, _) = program(300);
        let (P2(x, y), w, h) = prog.button_rect();
        let (cx, cy) = (x + w / 2, y + h / 2);

        // a narrow artwork puts the button under the bubble overlay
        let P2(ox, oy) = prog.overlay_origin();
        let size = OVERLAY_SIZE as i32;
        assert!((ox..ox + size).contains(&cx));
        assert!((oy..oy + size).contains(&cy));

        assert!(prog.eval_command(&Command::Click(cx, cy)));
        assert_eq!(prog.bubbles().len(), BUBBLE_BATCH);
    }

    #[test]
    fn button_sits_below_the_artwork() {
        let (prog, _) = program(600);
        let (P2(_, y), _, _) = prog.button_rect();

        assert_eq!(y, TOP_MARGIN + 480 + BUTTON_GAP);
    }

    #[test]
    fn frame_shows_art_overlay_and_button() {
        let now = Instant::now();
        let mut prog = Program::with_rng((600, 640), Box::new(Sequence::constant(0.5)), now);

        prog.eval_command(&Command::Regenerate);
        prog.render();

        // every cut sits at the middle and 0.5 < 0.6 picks a palette color
        let P2(ax, ay) = prog.art_origin();
        assert_eq!(prog.pix.pixel_xy(P2(ax + 100, ay + 100)), Some(LAYOUT_PALETTE[4]));
        assert_eq!(prog.pix.pixel_xy(P2(ax, ay)), Some(0xFF_00_00_00));
        assert_eq!(prog.pix.pixel_xy(P2(ax - 1, ay)), Some(BACKGROUND));

        // all ten bubbles share one spot in the overlay: (250, 424) after a tick
        let P2(ox, oy) = prog.overlay_origin();
        let bubble = prog.pix.pixel_xy(P2(ox + 250, oy + 424)).unwrap();
        assert_ne!(bubble, LAYOUT_PALETTE[4]);
        assert_ne!(bubble, WHITE);
        assert_eq!(bubble.alpha(), 0xFF);

        let (P2(bx, by), _, _) = prog.button_rect();
        assert_eq!(prog.pix.pixel_xy(P2(bx, by)), Some(BUTTON_INK));
    }

    #[test]
    fn bubbles_fade_out_over_frames() {
        let (mut prog, _) = program(600);
        prog.eval_command(&Command::Regenerate);

        for _ in 0..84 {
            prog.render();
        }
        assert_eq!(prog.bubbles().len(), 10);

        prog.render();
        assert!(prog.bubbles().is_empty());
    }

    #[test]
    fn title_types_through_update() {
        let (mut prog, t0) = program(600);
        let speed = typewriter::TYPING_SPEED;

        assert_eq!(prog.title(), "");
        assert!(prog.update(t0 + speed));
        assert_eq!(prog.title(), &typewriter::TITLE[..1]);

        let len = typewriter::TITLE.chars().count() as u32;
        prog.update(t0 + speed * len);
        assert_eq!(prog.title(), typewriter::TITLE);

        prog.update(t0 + speed * len + typewriter::TYPING_PAUSE);
        assert_eq!(prog.title(), "");
    }

    #[test]
    fn regenerate_keeps_live_bubbles() {
        let (mut prog, _) = program(600);
        prog.eval_command(&Command::Regenerate);

        for _ in 0..10 {
            prog.render();
        }
        prog.eval_command(&Command::Regenerate);

        assert_eq!(prog.bubbles().len(), 20);
        assert!(prog.bubbles().iter().any(|b| b.opacity == 255 - 30));
    }

    #[test]
    fn dispose_stops_everything() {
        let (mut prog, t0) = program(600);
        prog.eval_command(&Command::Regenerate);

        assert!(!prog.eval_command(&Command::Close));
        assert!(prog.is_disposed());
        assert!(prog.bubbles().is_empty());
        assert!(!prog.typewriter().is_running());

        assert!(!prog.update(t0 + Duration::from_secs(60)));
        assert!(!prog.eval_command(&Command::Regenerate));
        assert!(prog.bubbles().is_empty());
    }

    #[test]
    fn queued_commands_are_drained() {
        let (mut prog, _) = program(600);
        let mut cmds = vec![Command::Resize(600, 700), Command::Regenerate, Command::Click(-1, -1)];

        assert!(prog.eval_commands(&mut cmds));
        assert!(cmds.is_empty());
        assert_eq!(prog.bubbles().len(), 10);
    }

    #[test]
    fn icon_is_square_rgba() {
        let (mut prog, _) = program(600);
        let (rgba, w, h) = prog.icon_rgba(64);

        assert_eq!((w, h), (64, 64));
        assert_eq!(rgba.len(), 64 * 64 * 4);
        assert!(rgba.chunks_exact(4).all(|p| p[3] == 0xFF));
    }
}
