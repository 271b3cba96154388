/// Use mimalloc as the global allocator for all binaries.
/// Faster than the system malloc for the short-lived input and output
/// buffers the codec allocates per call.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod base64;
pub mod common;
