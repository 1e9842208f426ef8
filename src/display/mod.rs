mod pixel_buffer;

pub use pixel_buffer::{PixelBuffer, Rgba};

use sdl2::event::{Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use crate::error::{Error, Result};

/// Low-resolution render target every procedural stage works at (SNES frame)
pub const NATIVE_WIDTH: u32 = 256;
pub const NATIVE_HEIGHT: u32 = 224;

/// Default window is a 4x integer scale of the native frame
pub const DEFAULT_WIDTH: u32 = NATIVE_WIDTH * 4;
pub const DEFAULT_HEIGHT: u32 = NATIVE_HEIGHT * 4;

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    width: u32,
    height: u32,
}

/// Streaming texture the final CRT buffer is uploaded into
pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
    Resized { width: u32, height: u32 },
}

impl Display {
    /// Create display with custom resolution and VSync settings
    /// vsync=true: one frame per monitor refresh, the cadence the animation is tuned for
    /// vsync=false: uncapped framerate for performance testing
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>)> {
        let sdl_context = sdl2::init().map_err(Error::Display)?;
        let video_subsystem = sdl_context.video().map_err(Error::Display)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| Error::Display(e.to_string()))?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder
            .build()
            .map_err(|e| Error::Display(e.to_string()))?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(Error::Display)?;

        Ok((
            Self {
                canvas,
                event_pump,
                width,
                height,
            },
            texture_creator,
        ))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn present(&mut self, target: &mut RenderTarget, buffer: &PixelBuffer) -> Result<()> {
        if buffer.width() != target.width || buffer.height() != target.height {
            return Err(Error::Texture(format!(
                "buffer {}x{} does not match target {}x{}",
                buffer.width(),
                buffer.height(),
                target.width,
                target.height
            )));
        }

        target
            .texture
            .update(None, buffer.as_bytes(), buffer.pitch())
            .map_err(|e| Error::Texture(e.to_string()))?;

        self.canvas
            .copy(&target.texture, None, None)
            .map_err(Error::Display)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyDown(k)),
                Event::Window {
                    win_event: WindowEvent::SizeChanged(w, h),
                    ..
                } if w > 0 && h > 0 => {
                    self.width = w as u32;
                    self.height = h as u32;
                    events.push(InputEvent::Resized {
                        width: self.width,
                        height: self.height,
                    });
                },
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    /// Create a streaming render target with custom resolution
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
            .map_err(|e| Error::Texture(e.to_string()))?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
