//! EGL bring-up and teardown for the fbdev platform.
//!
//! There is no windowing system here: the native window handle is 0 and EGL's
//! fbdev backend hands back one fullscreen surface. The call sequence is
//! strictly linear and every step is fatal on failure.

use std::env;
use std::ffi::c_void;
use std::ptr;

use khronos_egl as egl;

use crate::error::SweepError;

type Instance = egl::DynamicInstance<egl::EGL1_4>;

/// RGBA8888, window-surface, GLES2-conformant, native-renderable.
const CONFIG_ATTRIBS: [i32; 15] = [
    egl::RED_SIZE,
    8,
    egl::GREEN_SIZE,
    8,
    egl::BLUE_SIZE,
    8,
    egl::ALPHA_SIZE,
    8,
    egl::SURFACE_TYPE,
    egl::WINDOW_BIT,
    egl::CONFORMANT,
    egl::OPENGL_ES2_BIT,
    egl::NATIVE_RENDERABLE,
    egl::TRUE as i32,
    egl::NONE,
];

const CONTEXT_ATTRIBS: [i32; 3] = [egl::CONTEXT_CLIENT_VERSION, 2, egl::NONE];

/// Owns the EGL display, context and surface for the life of the process.
pub struct EglContext {
    egl: Instance,
    display: egl::Display,
    context: egl::Context,
    surface: egl::Surface,
}

impl EglContext {
    /// Load libEGL and run the full bring-up sequence, leaving the new ES2
    /// context current on the fbdev surface with swap interval 1.
    pub fn new() -> Result<Self, SweepError> {
        // Honor a preset EGL_PLATFORM, otherwise target the framebuffer.
        if env::var_os("EGL_PLATFORM").is_none() {
            // SAFETY: runs before any other thread exists.
            unsafe { env::set_var("EGL_PLATFORM", "fbdev") };
        }

        // SAFETY: libEGL stays loaded for the life of the instance.
        let egl = unsafe { Instance::load_required() }
            .map_err(|e| SweepError::LoadEgl(e.to_string()))?;

        // SAFETY: DEFAULT_DISPLAY is a valid display id on every platform.
        let display = unsafe { egl.get_display(egl::DEFAULT_DISPLAY) }
            .ok_or(SweepError::NoDisplay)?;
        let (major, minor) = egl.initialize(display)?;
        tracing::debug!("EGL {}.{} initialized", major, minor);

        let config = egl
            .choose_first_config(display, &CONFIG_ATTRIBS)?
            .ok_or(SweepError::NoConfig)?;
        egl.bind_api(egl::OPENGL_ES_API)?;

        let context = egl.create_context(display, config, None, &CONTEXT_ATTRIBS)?;

        // SAFETY: window 0 is the fbdev backend's sole fullscreen window.
        let surface = unsafe {
            egl.create_window_surface(display, config, ptr::null_mut(), None)
        }?;

        egl.make_current(display, Some(surface), Some(surface), Some(context))?;
        egl.swap_interval(display, 1)?;

        Ok(Self {
            egl,
            display,
            context,
            surface,
        })
    }

    /// Build GLES2 bindings over `eglGetProcAddress`.
    ///
    /// Must be called while the context is current (it is, from [`new`] until
    /// drop).
    ///
    /// [`new`]: EglContext::new
    pub fn load_gl(&self) -> glow::Context {
        // SAFETY: the ES2 context created in new() is current on this thread.
        unsafe {
            glow::Context::from_loader_function(|name| {
                self.egl
                    .get_proc_address(name)
                    .map_or(ptr::null(), |p| p as *const c_void)
            })
        }
    }

    pub fn surface_size(&self) -> Result<(i32, i32), SweepError> {
        let width = self.egl.query_surface(self.display, self.surface, egl::WIDTH)?;
        let height = self.egl.query_surface(self.display, self.surface, egl::HEIGHT)?;
        Ok((width, height))
    }

    pub fn swap_buffers(&self) -> Result<(), SweepError> {
        self.egl.swap_buffers(self.display, self.surface)?;
        Ok(())
    }
}

impl Drop for EglContext {
    fn drop(&mut self) {
        // Teardown order: unbind, surface, context, display. Failures here are
        // unreportable; the process is exiting either way.
        let _ = self.egl.make_current(self.display, None, None, None);
        let _ = self.egl.destroy_surface(self.display, self.surface);
        let _ = self.egl.destroy_context(self.display, self.context);
        let _ = self.egl.terminate(self.display);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_attribs_are_pairs_with_terminator() {
        assert_eq!(CONFIG_ATTRIBS.len() % 2, 1);
        assert_eq!(*CONFIG_ATTRIBS.last().unwrap(), egl::NONE);
        // No stray terminator inside the pair region.
        assert!(
            !CONFIG_ATTRIBS[..CONFIG_ATTRIBS.len() - 1]
                .iter()
                .any(|&a| a == egl::NONE)
        );
    }

    #[test]
    fn config_requests_rgba8888_gles2_window() {
        let pair = |key| {
            CONFIG_ATTRIBS
                .chunks_exact(2)
                .find(|c| c[0] == key)
                .map(|c| c[1])
        };
        for channel in [egl::RED_SIZE, egl::GREEN_SIZE, egl::BLUE_SIZE, egl::ALPHA_SIZE] {
            assert_eq!(pair(channel), Some(8));
        }
        assert_eq!(pair(egl::SURFACE_TYPE), Some(egl::WINDOW_BIT));
        assert_eq!(pair(egl::CONFORMANT), Some(egl::OPENGL_ES2_BIT));
    }

    #[test]
    fn context_attribs_request_es2() {
        assert_eq!(
            CONTEXT_ATTRIBS,
            [egl::CONTEXT_CLIENT_VERSION, 2, egl::NONE]
        );
    }
}
