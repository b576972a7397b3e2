use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode image: {0}")]
    Encode(#[from] qoi::Error),

    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("softbuffer error: {0}")]
    Surface(#[from] softbuffer::SoftBufferError),

    #[error("nothing to export: the artwork is {0}x{0} pixels")]
    EmptyCanvas(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
