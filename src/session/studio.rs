use std::collections::HashMap;

use crate::capture::{CaptureOpts, FrameCapturePipeline, PixelStage};
use crate::encode::{FrameSink, GifSink, GifSinkOpts, encode_png};
use crate::foundation::core::Point;
use crate::foundation::error::{BubbleError, BubbleResult};
use crate::geometry::compute_geometry;
use crate::interact::{HitTarget, ManipulationController, PointerInput, ResizeBounds, hit_test};
use crate::pixel::PixelBubbleSettings;
use crate::render::backend::{FrameRGBA, RenderSettings};
use crate::render::cpu::CpuSurface;
use crate::render::vector::compose_overlay;
use crate::scene::background::BackgroundImage;
use crate::scene::bubble::{BubbleId, BubbleInstance, BubblePatch};
use crate::scene::store::BubbleStore;

/// Filename of the single-frame pixel export.
pub const STILL_FILENAME: &str = "pixel-bubble.png";
/// Filename of the animated pixel export.
pub const ANIMATED_FILENAME: &str = "pixel-bubble.gif";
/// Filename of the overlay export.
pub const OVERLAY_FILENAME: &str = "bubble-overlay.png";

/// Margin around the bubbles when the overlay has no background to size it.
const OVERLAY_MARGIN: f64 = 20.0;

/// An exported file, ready to be saved under `filename`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Download {
    /// Fixed output filename.
    pub filename: &'static str,
    /// MIME type of `bytes`.
    pub mime: &'static str,
    /// Encoded contents.
    pub bytes: Vec<u8>,
}

/// Options for a [`Studio`].
#[derive(Clone, Debug, Default)]
pub struct StudioOpts {
    /// Initial pixel bubble settings.
    pub pixel: PixelBubbleSettings,
    /// Blink animation script.
    pub capture: CaptureOpts,
    /// Minimum size for resizes of overlay bubbles.
    pub resize_bounds: ResizeBounds,
    /// Settings of the pixel surface.
    pub pixel_render: RenderSettings,
    /// Settings of the overlay scene.
    pub overlay_render: RenderSettings,
    /// Fixed overlay size; `None` uses the background size, or the bubble extent without one.
    pub overlay_size: Option<(u32, u32)>,
}

/// One editing session: overlay bubbles over an optional background plus the pixel bubble.
pub struct Studio {
    store: BubbleStore,
    background: Option<BackgroundImage>,
    stage: PixelStage,
    controllers: HashMap<BubbleId, ManipulationController>,
    opts: StudioOpts,
}

impl Studio {
    /// Studio with a CPU surface attached to the pixel stage.
    pub fn new(opts: StudioOpts) -> Self {
        let surface = CpuSurface::new(opts.pixel_render.clone());
        let stage = PixelStage::with_surface(opts.pixel.clone(), Box::new(surface));
        Self::with_stage(stage, opts)
    }

    /// Studio around an existing pixel stage.
    pub fn with_stage(stage: PixelStage, opts: StudioOpts) -> Self {
        Self {
            store: BubbleStore::new(),
            background: None,
            stage,
            controllers: HashMap::new(),
            opts,
        }
    }

    /// Overlay bubbles.
    pub fn store(&self) -> &BubbleStore {
        &self.store
    }

    /// Current background.
    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    /// Pixel stage.
    pub fn stage(&self) -> &PixelStage {
        &self.stage
    }

    /// Pixel stage, mutably.
    pub fn stage_mut(&mut self) -> &mut PixelStage {
        &mut self.stage
    }

    /// Replace the pixel bubble settings.
    pub fn set_pixel_settings(&mut self, settings: PixelBubbleSettings) {
        self.stage.set_settings(settings);
    }

    /// Add a bubble styled by `tag` with default text, size and position.
    pub fn add_bubble(&mut self, tag: &str) -> BubbleId {
        let id = self.store.add_bubble(tag);
        self.controllers.insert(
            id.clone(),
            ManipulationController::new(id.clone(), self.opts.resize_bounds),
        );
        id
    }

    /// Merge `patch`; unknown ids are ignored. Returns whether a bubble changed.
    pub fn update_bubble(&mut self, patch: &BubblePatch) -> bool {
        self.store.update(patch)
    }

    /// Remove a bubble and its controller.
    pub fn remove_bubble(&mut self, id: &BubbleId) -> Option<BubbleInstance> {
        self.controllers.remove(id);
        self.store.remove(id)
    }

    /// Install a background image.
    pub fn set_background(&mut self, image: BackgroundImage) {
        self.background = Some(image);
    }

    /// Remove the background image.
    pub fn clear_background(&mut self) -> Option<BackgroundImage> {
        self.background.take()
    }

    /// Accept a dropped file. Unsupported types leave the studio unchanged.
    pub fn drop_file(&mut self, bytes: Vec<u8>, mime: &str) -> BubbleResult<()> {
        let image = BackgroundImage::from_bytes(bytes, mime)?;
        self.set_background(image);
        Ok(())
    }

    /// Topmost bubble under `p` and the part that was hit.
    pub fn hit_test(&self, p: Point) -> Option<(BubbleId, HitTarget)> {
        let bubbles: Vec<&BubbleInstance> = self.store.iter().collect();
        bubbles.into_iter().rev().find_map(|b| {
            let editing = self
                .controllers
                .get(&b.id)
                .is_some_and(ManipulationController::is_editing);
            hit_test(b, p, editing).map(|t| (b.id.clone(), t))
        })
    }

    /// Route `input` to bubble `id`'s controller. Returns whether the store changed.
    pub fn pointer_event(&mut self, id: &BubbleId, input: &PointerInput) -> bool {
        match self.controllers.get_mut(id) {
            Some(controller) => controller.dispatch(input, &mut self.store),
            None => false,
        }
    }

    /// Controller of bubble `id`.
    pub fn controller(&self, id: &BubbleId) -> Option<&ManipulationController> {
        self.controllers.get(id)
    }

    /// Render the pixel bubble and copy the result.
    pub fn render_pixel(&mut self) -> BubbleResult<FrameRGBA> {
        let receipt = self.stage.render()?;
        self.stage.snapshot(receipt)
    }

    /// Export the pixel bubble as `pixel-bubble.png`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn export_still(&mut self) -> BubbleResult<Download> {
        let frame = self.render_pixel()?;
        Ok(Download {
            filename: STILL_FILENAME,
            mime: "image/png",
            bytes: encode_png(&frame)?,
        })
    }

    /// Capture the blink animation into `sink` and export it as `pixel-bubble.gif`.
    #[tracing::instrument(level = "debug", skip(self, sink))]
    pub fn export_animated(&mut self, sink: &mut dyn FrameSink) -> BubbleResult<Download> {
        let pipeline = FrameCapturePipeline::new(self.opts.capture.clone());
        let blob = pipeline.capture_into(&mut self.stage, sink)?;
        Ok(Download {
            filename: ANIMATED_FILENAME,
            mime: blob.mime,
            bytes: blob.bytes,
        })
    }

    /// [`Studio::export_animated`] with a default [`GifSink`].
    pub fn export_gif(&mut self) -> BubbleResult<Download> {
        let mut sink = GifSink::new(GifSinkOpts::default());
        self.export_animated(&mut sink)
    }

    /// Render background and bubbles as `bubble-overlay.png`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn export_overlay(&mut self) -> BubbleResult<Download> {
        let (w, h) = self.overlay_size()?;
        let frame = compose_overlay(
            &self.store,
            self.background.as_ref(),
            w,
            h,
            &self.opts.overlay_render,
        )?;
        Ok(Download {
            filename: OVERLAY_FILENAME,
            mime: "image/png",
            bytes: encode_png(&frame)?,
        })
    }

    /// Size of the overlay scene.
    pub fn overlay_size(&self) -> BubbleResult<(u32, u32)> {
        if let Some(size) = self.opts.overlay_size {
            return Ok(size);
        }
        if let Some(bg) = &self.background {
            return bg.dimensions();
        }

        let mut max = Point::new(1.0, 1.0);
        for b in self.store.iter() {
            let g = compute_geometry(b.width, b.height, &b.style);
            let at = g.placement(b.x, b.y);
            max.x = max.x.max(at.x + g.viewport.width + OVERLAY_MARGIN);
            max.y = max.y.max(at.y + g.viewport.height + OVERLAY_MARGIN);
        }
        let to_px = |v: f64| -> BubbleResult<u32> {
            if !v.is_finite() || v > f64::from(u16::MAX) {
                return Err(BubbleError::render("overlay extent exceeds u16"));
            }
            Ok(v.ceil() as u32)
        };
        Ok((to_px(max.x)?, to_px(max.y)?))
    }
}

impl Default for Studio {
    fn default() -> Self {
        Self::new(StudioOpts::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/studio.rs"]
mod tests;
