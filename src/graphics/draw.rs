use super::{Argb, Canvas, Mixer, Pixel, P2};

impl Canvas {
    /// Fills `w` × `h` pixels starting at `p`, clipped to the canvas.
    pub fn draw_rect_wh_by(&mut self, p: P2, w: i32, h: i32, c: Argb, b: Mixer) {
        let (cw, ch) = (self.width() as i32, self.height() as i32);

        let xs = p.0.clamp(0, cw);
        let ys = p.1.clamp(0, ch);
        let xe = p.0.saturating_add(w).clamp(0, cw);
        let ye = p.1.saturating_add(h).clamp(0, ch);

        if xs >= xe || ys >= ye {
            return;
        }

        let width = self.width();

        self.as_mut_slice()
            .chunks_exact_mut(width)
            .skip(ys as usize)
            .take((ye - ys) as usize)
            .flat_map(|line| &mut line[xs as usize..xe as usize])
            .for_each(|px| *px = b(*px, c));
    }

    pub fn draw_rect_wh(&mut self, p: P2, w: i32, h: i32, c: Argb) {
        self.draw_rect_wh_by(p, w, h, c, Argb::over);
    }

    /// Fills the rectangle spanning `[xs, xe) × [ys, ye)` in canvas units,
    /// with edges rounded to the nearest pixel.
    pub fn fill_rect_f(&mut self, xs: f32, ys: f32, xe: f32, ye: f32, c: Argb) {
        let (xs, ys) = (xs.round() as i32, ys.round() as i32);
        let (xe, ye) = (xe.round() as i32, ye.round() as i32);

        self.draw_rect_wh(P2(xs, ys), xe - xs, ye - ys, c);
    }

    /// Strokes the outline of a rectangle. The stroke is centered on
    /// the edge, so half of `weight` falls outside the rectangle.
    pub fn stroke_rect(&mut self, p: P2, w: i32, h: i32, weight: i32, c: Argb) {
        if weight <= 0 {
            return;
        }

        let outer = weight / 2;
        let full = weight;

        let ps = P2(p.0 - outer, p.1 - outer);
        let (ow, oh) = (w + full, h + full);

        // top, bottom, left, right
        self.draw_rect_wh(ps, ow, full, c);
        self.draw_rect_wh(P2(ps.0, ps.1 + oh - full), ow, full, c);
        self.draw_rect_wh(ps, full, oh, c);
        self.draw_rect_wh(P2(ps.0 + ow - full, ps.1), full, oh, c);
    }

    /// Fills a circle of diameter `d` centered at `(cx, cy)`.
    /// A pixel is covered when its center lies inside the circle.
    pub fn draw_circle_by(&mut self, cx: f32, cy: f32, d: f32, c: Argb, b: Mixer) {
        let r = d * 0.5;

        if r <= 0.0 {
            return;
        }

        let ys = (cy - r - 0.5).ceil() as i32;
        let ye = (cy + r - 0.5).floor() as i32;

        for y in ys..=ye {
            let dy = y as f32 + 0.5 - cy;
            let span = r * r - dy * dy;

            if span < 0.0 {
                continue;
            }

            let half = span.sqrt();
            let xs = (cx - half - 0.5).ceil() as i32;
            let xe = (cx + half - 0.5).floor() as i32;

            self.draw_rect_wh_by(P2(xs, y), xe - xs + 1, 1, c, b);
        }
    }

    /// Composites `src` onto this canvas with its top left corner at `at`.
    pub fn blit_by(&mut self, src: &Canvas, at: P2, b: Mixer) {
        let (sw, sh) = (src.width() as i32, src.height() as i32);
        let (dw, dh) = (self.width() as i32, self.height() as i32);

        let xs = at.0.max(0);
        let xe = (at.0 + sw).min(dw);

        if xs >= xe {
            return;
        }

        for y in at.1.max(0)..(at.1 + sh).min(dh) {
            let src_start = ((y - at.1) * sw + (xs - at.0)) as usize;
            let dst_start = (y * dw + xs) as usize;
            let len = (xe - xs) as usize;

            let src_row = &src.as_slice()[src_start..src_start + len];
            let dst_row = &mut self.as_mut_slice()[dst_start..dst_start + len];

            for (d, s) in dst_row.iter_mut().zip(src_row) {
                *d = b(*d, *s);
            }
        }
    }

    pub fn blit(&mut self, src: &Canvas, at: P2) {
        self.blit_by(src, at, Argb::mix);
    }
}
