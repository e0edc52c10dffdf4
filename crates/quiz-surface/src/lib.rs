//! quiz-surface: CPU canvas and GPU presentation.
//!
//! Frames are painted into a [`Canvas`] (a `tiny-skia` pixmap plus glyph
//! blending for `fontdue` masks) and then handed to a [`FramePresenter`],
//! which uploads the pixels into a texture and draws it as a screen quad.

pub mod canvas;
pub mod presenter;
pub mod shader;
pub mod shapes;
pub mod texture;

pub use canvas::{gray, rgb, rgba, Canvas, Color, ShapeStyle};
pub use presenter::FramePresenter;
pub use texture::CanvasTexture;

pub use wgpu;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SurfaceError {
    #[error("cannot allocate a {width}x{height} canvas")]
    Allocation { width: u32, height: u32 },
    #[error("pixel data is {actual} bytes, texture expects {expected}")]
    SizeMismatch { expected: usize, actual: usize },
}

/// Choose an sRGB surface format when available. `None` when the surface
/// reports no formats for this adapter.
pub fn choose_srgb_surface_format(caps: &wgpu::SurfaceCapabilities) -> Option<wgpu::TextureFormat> {
    caps.formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first().copied())
}

/// Build a surface configuration from reported capabilities, favoring FIFO
/// and opaque compositing.
pub fn surface_config_from_caps(
    caps: &wgpu::SurfaceCapabilities,
    width: u32,
    height: u32,
) -> Option<wgpu::SurfaceConfiguration> {
    let format = choose_srgb_surface_format(caps)?;
    let present_mode = if caps.present_modes.contains(&wgpu::PresentMode::Fifo) {
        wgpu::PresentMode::Fifo
    } else {
        *caps.present_modes.first()?
    };
    let alpha_mode = if caps.alpha_modes.contains(&wgpu::CompositeAlphaMode::Opaque) {
        wgpu::CompositeAlphaMode::Opaque
    } else {
        *caps.alpha_modes.first()?
    };
    Some(wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 1,
    })
}

/// Query `surface` on `adapter` and configure it for `width` x `height`.
pub fn make_surface_config(
    adapter: &wgpu::Adapter,
    surface: &wgpu::Surface,
    width: u32,
    height: u32,
) -> Option<wgpu::SurfaceConfiguration> {
    surface_config_from_caps(&surface.get_capabilities(adapter), width, height)
}
