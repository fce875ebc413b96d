//! Device properties: requested resolution and debug level.
//!
//! Parsed from a whitespace-separated property string such as
//! `pynqfb.width=1280 pynqfb.height=1024 pynqfb.debug=1`. The short keys
//! `width=`, `height=` and `debug=` are accepted too. Unknown tokens and
//! unparsable values are ignored.

use pynqfb_abi::{FbError, FbResult};
use pynqfb_lib::{KlogLevel, klog_error};

pub const FB_CONFIG_DEFAULT_DEBUG: u32 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FbConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub debug: u32,
}

impl Default for FbConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            debug: FB_CONFIG_DEFAULT_DEBUG,
        }
    }
}

impl FbConfig {
    pub const fn with_resolution(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            debug: FB_CONFIG_DEFAULT_DEBUG,
        }
    }

    pub const fn debug(mut self, debug: u32) -> Self {
        self.debug = debug;
        self
    }

    pub fn parse(properties: &str) -> Self {
        let mut config = Self::default();
        for token in properties.split_ascii_whitespace() {
            process_token(&mut config, token);
        }
        config
    }

    /// Both dimensions, or `InvalidArgument` naming the missing one.
    pub fn resolution(&self) -> FbResult<(u32, u32)> {
        let Some(width) = self.width else {
            klog_error!("PYNQFB: Can't parse width property");
            return Err(FbError::InvalidArgument);
        };
        let Some(height) = self.height else {
            klog_error!("PYNQFB: Can't parse height property");
            return Err(FbError::InvalidArgument);
        };
        Ok((width, height))
    }

    pub fn log_level(&self) -> KlogLevel {
        KlogLevel::from_debug(self.debug)
    }
}

fn parse_u32(value: &str) -> Option<u32> {
    if let Some(hex) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        return u32::from_str_radix(hex, 16).ok();
    }
    value.parse().ok()
}

fn process_token(config: &mut FbConfig, token: &str) {
    let token = token.strip_prefix("pynqfb.").unwrap_or(token);

    if let Some(value) = token.strip_prefix("width=") {
        if let Some(width) = parse_u32(value) {
            config.width = Some(width);
        }
        return;
    }
    if let Some(value) = token.strip_prefix("height=") {
        if let Some(height) = parse_u32(value) {
            config.height = Some(height);
        }
        return;
    }
    if let Some(value) = token.strip_prefix("debug=") {
        if let Some(debug) = parse_u32(value) {
            config.debug = debug;
        }
    }
}
