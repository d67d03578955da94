// File: crates/agentchart-skia/src/raster.rs
// Summary: Headless PNG/RGBA rendering of a chart scene using Skia CPU raster surfaces.

use anyhow::{Context, Result};
use skia_safe as skia;

use agentchart_core::axis::Orientation;
use agentchart_core::palette::Color;
use agentchart_core::scene::{AxisNode, Node, PathNode, Scene, Shape};

use crate::text::{Anchor, TextShaper};
use crate::theme::Theme;

pub struct RasterOptions {
    pub theme: Theme,
    /// Tick labels and titles; off for pixel-exact comparisons across platforms.
    pub draw_labels: bool,
    pub label_size: f32,
    pub line_width: f32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { theme: Theme::default(), draw_labels: true, label_size: 11.0, line_width: 1.5 }
    }
}

fn to_skia(c: Color) -> skia::Color {
    skia::Color::from_rgb(c.r, c.g, c.b)
}

pub struct SkiaRenderer {
    shaper: Option<TextShaper>,
}

impl SkiaRenderer {
    pub fn new(opts: &RasterOptions) -> Self {
        Self { shaper: opts.draw_labels.then(TextShaper::new) }
    }

    fn draw(&self, scene: &Scene, opts: &RasterOptions) -> Result<skia::Surface> {
        let mut surface = skia::surfaces::raster_n32_premul((scene.width as i32, scene.height as i32))
            .ok_or_else(|| anyhow::anyhow!("failed to create {}x{} raster surface", scene.width, scene.height))?;
        let canvas = surface.canvas();
        canvas.clear(opts.theme.background);

        canvas.save();
        canvas.translate((scene.origin.0 as f32, scene.origin.1 as f32));
        // axes first so the grid sits under the data
        for axis in scene.axes() {
            self.draw_axis(canvas, axis, opts);
        }
        for node in &scene.nodes {
            if let Node::Path(p) = node {
                draw_path(canvas, p, opts);
            }
        }
        canvas.restore();
        Ok(surface)
    }

    /// Encode the scene as PNG bytes.
    pub fn render_png_bytes(&self, scene: &Scene, opts: &RasterOptions) -> Result<Vec<u8>> {
        let mut surface = self.draw(scene, opts)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the scene to a PNG at `output_png_path`, creating parent dirs.
    pub fn render_png(&self, scene: &Scene, opts: &RasterOptions, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let path = output_png_path.as_ref();
        let bytes = self.render_png_bytes(scene, opts)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }

    /// Unpremultiplied RGBA8 pixels: (buffer, width, height, stride).
    pub fn render_rgba8(&self, scene: &Scene, opts: &RasterOptions) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.draw(scene, opts)?;
        let (w, h) = (scene.width, scene.height);
        let info = skia::ImageInfo::new(
            (w as i32, h as i32),
            skia::ColorType::RGBA8888,
            skia::AlphaType::Unpremul,
            None,
        );
        let stride = w as usize * 4;
        let mut px = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut px, stride, (0, 0)) {
            anyhow::bail!("reading back {}x{} pixels failed", w, h);
        }
        Ok((px, w, h, stride))
    }

    fn draw_axis(&self, canvas: &skia::Canvas, node: &AxisNode, opts: &RasterOptions) {
        let axis = &node.axis;
        let theme = &opts.theme;

        let mut grid = skia::Paint::default();
        grid.set_color(theme.grid);
        grid.set_anti_alias(true);
        grid.set_stroke_width(1.0);

        let mut line = skia::Paint::default();
        line.set_color(theme.axis_line);
        line.set_anti_alias(true);
        line.set_stroke_width(1.0);

        canvas.save();
        canvas.translate((node.offset.0 as f32, node.offset.1 as f32));

        let inner = axis.options.inner_size as f32;
        let gap = axis.label_offset() as f32;
        let size = opts.label_size;
        for tick in &axis.ticks {
            let at = tick.offset as f32;
            match axis.orientation {
                Orientation::Bottom => {
                    canvas.draw_line((at, 0.0), (at, inner), &grid);
                    if let Some(shaper) = &self.shaper {
                        shaper.draw(canvas, &tick.label, at, gap + size, size, theme.tick_label, Anchor::Middle);
                    }
                }
                Orientation::Left => {
                    canvas.draw_line((0.0, at), (-inner, at), &grid);
                    if let Some(shaper) = &self.shaper {
                        shaper.draw(canvas, &tick.label, -gap, at + size * 0.35, size, theme.tick_label, Anchor::End);
                    }
                }
            }
        }

        let (r0, r1) = (axis.range.0 as f32, axis.range.1 as f32);
        match axis.orientation {
            Orientation::Bottom => canvas.draw_line((r0, 0.0), (r1, 0.0), &line),
            Orientation::Left => canvas.draw_line((0.0, r0), (0.0, r1), &line),
        };

        if let (Some(title), Some(shaper)) = (&axis.title, &self.shaper) {
            canvas.save();
            canvas.rotate(-90.0, None);
            shaper.draw(canvas, title, 0.0, 6.0 + size, size, theme.title, Anchor::End);
            canvas.restore();
        }
        canvas.restore();
    }
}

fn draw_path(canvas: &skia::Canvas, node: &PathNode, opts: &RasterOptions) {
    let mut path = skia::Path::new();
    match &node.shape {
        Shape::Line(segs) => {
            for seg in segs {
                for (i, &(x, y)) in seg.iter().enumerate() {
                    let p = (x as f32, y as f32);
                    if i == 0 { path.move_to(p); } else { path.line_to(p); }
                }
            }
        }
        Shape::Area(segs) => {
            for seg in segs {
                for (i, v) in seg.iter().enumerate() {
                    let p = (v.x as f32, v.y1 as f32);
                    if i == 0 { path.move_to(p); } else { path.line_to(p); }
                }
                for v in seg.iter().rev() {
                    path.line_to((v.x as f32, v.y0 as f32));
                }
                path.close();
            }
        }
    }

    if let Some(fill) = node.fill {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Fill);
        paint.set_color(to_skia(fill));
        canvas.draw_path(&path, &paint);
    }
    if let Some(stroke) = node.stroke {
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        paint.set_style(skia::paint::Style::Stroke);
        paint.set_stroke_width(opts.line_width);
        paint.set_color(to_skia(stroke));
        canvas.draw_path(&path, &paint);
    }
}
