use crate::foundation::error::{BubbleError, BubbleResult};
use crate::pixel::{PixelBubbleSettings, PixelRenderSpec, render};
use crate::render::backend::{FrameRGBA, RasterSurface};

/// Proof that a render pass finished for one state generation.
///
/// Returned by [`PixelStage::render`] and required by [`PixelStage::snapshot`], so pixels are never
/// read before the surface reflects the latest parameter change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct RenderReceipt {
    /// State generation that was rendered.
    pub generation: u64,
}

/// Owner of the pixel bubble's raster surface and its render inputs.
///
/// Every mutation of the inputs bumps a generation counter; receipts from older generations are
/// rejected when snapshotting.
pub struct PixelStage {
    settings: PixelBubbleSettings,
    animation_text: Option<String>,
    surface: Option<Box<dyn RasterSurface>>,
    generation: u64,
    rendered: Option<u64>,
}

impl PixelStage {
    /// Stage without a surface.
    pub fn new(settings: PixelBubbleSettings) -> Self {
        Self {
            settings,
            animation_text: None,
            surface: None,
            generation: 0,
            rendered: None,
        }
    }

    /// Stage drawing into `surface`.
    pub fn with_surface(settings: PixelBubbleSettings, surface: Box<dyn RasterSurface>) -> Self {
        let mut stage = Self::new(settings);
        stage.attach_surface(surface);
        stage
    }

    /// Install (or replace) the raster surface.
    pub fn attach_surface(&mut self, surface: Box<dyn RasterSurface>) {
        self.surface = Some(surface);
        self.bump();
    }

    /// Remove the raster surface.
    pub fn detach_surface(&mut self) -> Option<Box<dyn RasterSurface>> {
        self.bump();
        self.surface.take()
    }

    /// Whether a surface is attached.
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Current settings.
    pub fn settings(&self) -> &PixelBubbleSettings {
        &self.settings
    }

    /// Replace the settings.
    pub fn set_settings(&mut self, settings: PixelBubbleSettings) {
        self.settings = settings;
        self.bump();
    }

    /// Override the displayed text while animating; `None` restores normal rendering.
    pub fn set_animation_text(&mut self, text: Option<String>) {
        self.animation_text = text;
        self.bump();
    }

    /// Current animation override.
    pub fn animation_text(&self) -> Option<&str> {
        self.animation_text.as_deref()
    }

    /// Text that the next render shows.
    pub fn effective_text(&self) -> &str {
        self.animation_text.as_deref().unwrap_or(&self.settings.text)
    }

    /// Current state generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Raster spec for the current inputs.
    pub fn spec(&self) -> PixelRenderSpec {
        self.settings.spec_with_text(self.effective_text())
    }

    /// Redraw the surface from the current inputs.
    pub fn render(&mut self) -> BubbleResult<RenderReceipt> {
        let spec = self.spec();
        let surface = self
            .surface
            .as_deref_mut()
            .ok_or_else(|| BubbleError::render("raster surface unavailable"))?;
        render(&spec, surface)?;
        self.rendered = Some(self.generation);
        tracing::trace!(generation = self.generation, "pixel stage rendered");
        Ok(RenderReceipt {
            generation: self.generation,
        })
    }

    /// Copy the surface contents rendered for `receipt`.
    pub fn snapshot(&mut self, receipt: RenderReceipt) -> BubbleResult<FrameRGBA> {
        if receipt.generation != self.generation || self.rendered != Some(self.generation) {
            return Err(BubbleError::capture(format!(
                "stale render receipt (generation {}, current {})",
                receipt.generation, self.generation
            )));
        }
        let surface = self
            .surface
            .as_deref_mut()
            .ok_or_else(|| BubbleError::capture("raster surface unavailable"))?;
        Ok(surface.snapshot())
    }

    fn bump(&mut self) {
        self.generation += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/stage.rs"]
mod tests;
