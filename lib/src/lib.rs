#![cfg_attr(not(test), no_std)]

pub mod alignment;
pub mod delay;
pub mod klog;

pub use alignment::{PAGE_SIZE_4KB, align_down, align_up, page_align};
pub use delay::{DelayMs, SpinDelay};
pub use klog::{
    KlogLevel, KlogSink, klog_attach_sink, klog_detach_sink, klog_get_level, klog_init,
    klog_set_level,
};
