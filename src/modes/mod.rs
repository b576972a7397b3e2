use std::path::PathBuf;

#[cfg(feature = "terminal")]
pub mod console_mode;

pub mod windowed_mode;

#[derive(Debug, PartialEq, Clone)]
pub enum Mode {
    Win,
    #[cfg(feature = "terminal")]
    ConBlock,
    Snapshot(PathBuf),
}

impl Mode {
    pub fn get_name(&self) -> &'static str {
        match self {
            Mode::Win => "window",
            #[cfg(feature = "terminal")]
            Mode::ConBlock => "terminal (block)",
            Mode::Snapshot(_) => "snapshot",
        }
    }

    pub fn is_con(&self) -> bool {
        #[cfg(feature = "terminal")]
        if *self == Mode::ConBlock {
            return true;
        }

        false
    }
}
