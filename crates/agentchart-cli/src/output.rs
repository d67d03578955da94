// File: crates/agentchart-cli/src/output.rs
// Summary: CLI render target: SVG file plus an optional PNG raster of the same scene.

use std::path::PathBuf;

use agentchart_fetch::{ChartError, FileTarget, RenderTarget, RenderedChart};
use agentchart_skia::{RasterOptions, SkiaRenderer};

pub struct OutputTarget {
    svg: FileTarget,
    png: Option<(PathBuf, RasterOptions)>,
}

impl OutputTarget {
    pub fn svg_only(path: impl Into<PathBuf>) -> Self {
        Self { svg: FileTarget::new(path), png: None }
    }

    /// PNG goes next to the SVG, same stem.
    pub fn with_png(mut self, opts: RasterOptions) -> Self {
        let png = self.svg.path().with_extension("png");
        self.png = Some((png, opts));
        self
    }

    pub fn png_path(&self) -> Option<&std::path::Path> {
        self.png.as_ref().map(|(p, _)| p.as_path())
    }
}

impl RenderTarget for OutputTarget {
    fn is_attached(&self) -> bool {
        true
    }

    // Encode first, then SVG, then PNG: a failed append never leaves a PNG without its SVG.
    fn append(&self, chart: RenderedChart) -> agentchart_fetch::Result<()> {
        let png = match &self.png {
            Some((path, opts)) => {
                let bytes = SkiaRenderer::new(opts)
                    .render_png_bytes(&chart.scene, opts)
                    .map_err(|e| ChartError::Target(format!("{e:#}")))?;
                Some((path, bytes))
            }
            None => None,
        };
        self.svg.append(chart)?;
        if let Some((path, bytes)) = png {
            std::fs::write(path, bytes).map_err(|e| ChartError::Target(format!("write {}: {e}", path.display())))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agentchart_core::{render_svg, AreaChart, ChartConfig, Color, DataPoint};

    #[test]
    fn writes_svg_and_png() {
        let dir = tempfile::tempdir().unwrap();
        let svg_path = dir.path().join("cpu.svg");
        let target = OutputTarget::svg_only(&svg_path).with_png(RasterOptions { draw_labels: false, ..Default::default() });

        let scene = AreaChart::new(ChartConfig::new("u", "cpu"), Color::rgb(0x31, 0x82, 0xbd))
            .layout(&[DataPoint::new(1000.0, 2.0), DataPoint::new(2000.0, 4.0)])
            .unwrap()
            .scene();
        let svg = render_svg(&scene);
        target.append(RenderedChart { svg, scene }).unwrap();

        assert!(svg_path.exists());
        let png = std::fs::read(target.png_path().unwrap()).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn failed_svg_write_leaves_no_png() {
        let dir = tempfile::tempdir().unwrap();
        let svg_path = dir.path().join("missing").join("cpu.svg");
        let target = OutputTarget::svg_only(&svg_path).with_png(RasterOptions { draw_labels: false, ..Default::default() });

        let scene = AreaChart::new(ChartConfig::new("u", "cpu"), Color::rgb(0x31, 0x82, 0xbd))
            .layout(&[DataPoint::new(1000.0, 2.0), DataPoint::new(2000.0, 4.0)])
            .unwrap()
            .scene();
        let svg = render_svg(&scene);
        let err = target.append(RenderedChart { svg, scene }).unwrap_err();

        assert!(matches!(err, ChartError::Target(_)));
        assert!(!svg_path.exists());
        assert!(!target.png_path().unwrap().exists());
    }
}
