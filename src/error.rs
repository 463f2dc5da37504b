//! Fatal error type for GPU bring-up and the draw loop.
//!
//! Every EGL and GL call site either returns a [`SweepError`] directly or is
//! followed by [`check_gl`]; there is no retry or degraded mode anywhere.

use glow::HasContext;
use khronos_egl as egl;

#[derive(Debug, thiserror::Error)]
pub enum SweepError {
    #[error("failed to load libEGL: {0}")]
    LoadEgl(String),

    #[error("EGL call failed: {0}")]
    Egl(#[from] egl::Error),

    #[error("EGL returned no display for the default display id")]
    NoDisplay,

    #[error("no EGL config matches RGBA8888 / window surface / GLES2")]
    NoConfig,

    #[error("{stage} shader failed to compile: {log}")]
    ShaderCompile { stage: &'static str, log: String },

    #[error("shader program failed to link: {0}")]
    ProgramLink(String),

    #[error("failed to allocate GL object: {0}")]
    Allocate(String),

    #[error("shader interface missing \"{0}\"")]
    MissingLocation(&'static str),

    #[error("GL error 0x{code:04x} after {call}")]
    Gl { code: u32, call: &'static str },
}

/// Drain `glGetError` after a group of GL calls, failing on the first error.
pub fn check_gl(gl: &glow::Context, call: &'static str) -> Result<(), SweepError> {
    let code = unsafe { gl.get_error() };
    if code == glow::NO_ERROR {
        Ok(())
    } else {
        Err(SweepError::Gl { code, call })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gl_error_display_names_the_call() {
        let e = SweepError::Gl {
            code: 0x0502,
            call: "glDrawArrays",
        };
        assert_eq!(e.to_string(), "GL error 0x0502 after glDrawArrays");
    }

    #[test]
    fn shader_error_display_carries_driver_log() {
        let e = SweepError::ShaderCompile {
            stage: "fragment",
            log: "0:3: syntax error".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("fragment"));
        assert!(msg.contains("0:3: syntax error"));
    }
}
