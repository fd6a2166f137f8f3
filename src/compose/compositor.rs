use std::path::{Path, PathBuf};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::catalog::store::TraitCatalog;
use crate::collection::model::Collectible;
use crate::compose::blend;
use crate::config::model::CanvasSize;
use crate::foundation::error::{LayerforgeError, LayerforgeResult};

/// Threading controls for batch rendering.
#[derive(Clone, Debug, Default)]
pub struct RenderThreading {
    /// Render collectibles concurrently when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// Flattens a collectible's layer stack into a single raster image.
///
/// Layers draw at native pixel size from the origin, clipped to the canvas;
/// later attributes composite over earlier ones.
pub struct Compositor<'a> {
    catalog: &'a TraitCatalog,
    layer_root: PathBuf,
    canvas: CanvasSize,
}

struct DecodedLayer {
    width: u32,
    height: u32,
    /// Premultiplied RGBA8, row-major.
    data: Vec<u8>,
}

impl<'a> Compositor<'a> {
    pub fn new(
        catalog: &'a TraitCatalog,
        layer_root: impl Into<PathBuf>,
        canvas: CanvasSize,
    ) -> Self {
        Self {
            catalog,
            layer_root: layer_root.into(),
            canvas,
        }
    }

    /// Render one collectible to a straight-alpha RGBA image.
    ///
    /// A missing catalog entry or unreadable layer file aborts the render
    /// with an error naming the collectible id and the offending path.
    #[tracing::instrument(skip(self, collectible), fields(id = collectible.id))]
    pub fn render(&self, collectible: &Collectible) -> LayerforgeResult<image::RgbaImage> {
        let (width, height) = (self.canvas.width, self.canvas.height);
        let mut canvas = vec![0u8; width as usize * height as usize * 4];

        for attr in &collectible.attributes {
            let t = self
                .catalog
                .find(&attr.name, &attr.rarity, &attr.value)
                .ok_or_else(|| {
                    LayerforgeError::asset(format!(
                        "collectible {}: no catalog entry for '{}/{}/{}'",
                        collectible.id, attr.name, attr.rarity, attr.value
                    ))
                })?;
            let path = self.catalog.layer_path(&self.layer_root, t);
            let layer = load_layer(&path, collectible.id)?;
            blend_layer(&mut canvas, self.canvas, &layer);
        }

        blend::unpremultiply_rgba8_in_place(&mut canvas);
        image::RgbaImage::from_raw(width, height, canvas)
            .ok_or_else(|| LayerforgeError::internal("canvas buffer size mismatch"))
    }

    /// Render one collectible and write `<id>.png` under `out_dir`.
    pub fn render_to_dir(
        &self,
        collectible: &Collectible,
        out_dir: &Path,
    ) -> LayerforgeResult<PathBuf> {
        let frame = self.render(collectible)?;
        std::fs::create_dir_all(out_dir)
            .with_context(|| format!("create output dir '{}'", out_dir.display()))?;
        let out_path = out_dir.join(format!("{}.png", collectible.id));
        image::save_buffer_with_format(
            &out_path,
            frame.as_raw(),
            frame.width(),
            frame.height(),
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", out_path.display()))?;
        Ok(out_path)
    }

    /// Render every collectible into `out_dir`.
    ///
    /// Stops at the first error; callers that want to continue across
    /// failures drive [`render_to_dir`](Self::render_to_dir) themselves.
    pub fn render_all(
        &self,
        collectibles: &[Collectible],
        out_dir: &Path,
        threading: &RenderThreading,
    ) -> LayerforgeResult<Vec<PathBuf>> {
        if !threading.parallel {
            return collectibles
                .iter()
                .map(|c| self.render_to_dir(c, out_dir))
                .collect();
        }

        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| {
            collectibles
                .par_iter()
                .map(|c| self.render_to_dir(c, out_dir))
                .collect()
        })
    }
}

fn build_thread_pool(threads: Option<usize>) -> LayerforgeResult<rayon::ThreadPool> {
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| LayerforgeError::internal(format!("build render thread pool: {e}")))
}

fn load_layer(path: &Path, id: u32) -> LayerforgeResult<DecodedLayer> {
    let bytes = std::fs::read(path).map_err(|e| {
        LayerforgeError::asset(format!(
            "collectible {id}: read layer '{}': {e}",
            path.display()
        ))
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|e| {
        LayerforgeError::asset(format!(
            "collectible {id}: decode layer '{}': {e}",
            path.display()
        ))
    })?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut data = rgba.into_raw();
    blend::premultiply_rgba8_in_place(&mut data);
    Ok(DecodedLayer {
        width,
        height,
        data,
    })
}

fn blend_layer(canvas: &mut [u8], size: CanvasSize, layer: &DecodedLayer) {
    let w = size.width.min(layer.width) as usize;
    let h = size.height.min(layer.height) as usize;
    let canvas_stride = size.width as usize * 4;
    let layer_stride = layer.width as usize * 4;

    for y in 0..h {
        let crow = y * canvas_stride;
        let lrow = y * layer_stride;
        for x in 0..w {
            let ci = crow + x * 4;
            let li = lrow + x * 4;
            let out = blend::over(
                [canvas[ci], canvas[ci + 1], canvas[ci + 2], canvas[ci + 3]],
                [
                    layer.data[li],
                    layer.data[li + 1],
                    layer.data[li + 2],
                    layer.data[li + 3],
                ],
            );
            canvas[ci..ci + 4].copy_from_slice(&out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;
