//! Full-screen quad renderer.
//!
//! All GL state is set once at construction; the per-frame work is one uniform
//! update and one draw call. Each group of GL calls is followed by a
//! `check_gl`, so any driver error aborts the frame immediately.

use glow::HasContext;

use crate::error::{SweepError, check_gl};
use crate::shader::{FRAGMENT_SHADER, VERTEX_SHADER, compile_shader, link_program};

/// Full-screen quad as a triangle fan, vec4 per vertex.
pub const QUAD_VERTICES: [f32; 16] = [
    -1.0, -1.0, 1.0, 1.0, //
    -1.0, 1.0, 1.0, 1.0, //
    1.0, 1.0, 1.0, 1.0, //
    1.0, -1.0, 1.0, 1.0, //
];

const VERTEX_STRIDE: i32 = 16;
const VERTEX_COUNT: i32 = 4;

pub struct SweepRenderer {
    sweep_uniform: glow::UniformLocation,
}

impl SweepRenderer {
    /// Upload the quad, build the program and leave everything bound for the
    /// draw loop: program current, attribute array enabled, framebuffer 0.
    pub fn new(gl: &glow::Context) -> Result<Self, SweepError> {
        unsafe {
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            check_gl(gl, "glClearColor")?;

            let quad = gl.create_buffer().map_err(SweepError::Allocate)?;
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(quad));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&QUAD_VERTICES),
                glow::STATIC_DRAW,
            );
            check_gl(gl, "glBufferData")?;

            let vertex = compile_shader(gl, glow::VERTEX_SHADER, VERTEX_SHADER)?;
            let fragment = compile_shader(gl, glow::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
            let program = link_program(gl, vertex, fragment)?;

            let position = gl
                .get_attrib_location(program, "vertex")
                .ok_or(SweepError::MissingLocation("vertex"))?;
            let sweep_uniform = gl
                .get_uniform_location(program, "sweep")
                .ok_or(SweepError::MissingLocation("sweep"))?;

            gl.vertex_attrib_pointer_f32(position, 4, glow::FLOAT, false, VERTEX_STRIDE, 0);
            gl.enable_vertex_attrib_array(position);
            check_gl(gl, "glVertexAttribPointer")?;

            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            gl.use_program(Some(program));
            check_gl(gl, "glUseProgram")?;

            Ok(Self { sweep_uniform })
        }
    }

    /// Draw one frame at the given sweep phase (fraction of the surface width
    /// rendered white, in `[0, 1)`).
    pub fn draw(&self, gl: &glow::Context, phase: f32) -> Result<(), SweepError> {
        unsafe {
            gl.uniform_1_f32(Some(&self.sweep_uniform), phase);
            check_gl(gl, "glUniform1f")?;

            gl.draw_arrays(glow::TRIANGLE_FAN, 0, VERTEX_COUNT);
            check_gl(gl, "glDrawArrays")?;

            // The fbdev backend needs the finish before the buffer swap.
            gl.finish();
            check_gl(gl, "glFinish")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_matches_stride_and_count() {
        let bytes: &[u8] = bytemuck::cast_slice(&QUAD_VERTICES);
        assert_eq!(bytes.len() as i32, VERTEX_STRIDE * VERTEX_COUNT);
    }

    #[test]
    fn quad_spans_clip_space() {
        let corners: Vec<(f32, f32)> = QUAD_VERTICES
            .chunks_exact(4)
            .map(|v| (v[0], v[1]))
            .collect();
        for expected in [(-1.0, -1.0), (-1.0, 1.0), (1.0, 1.0), (1.0, -1.0)] {
            assert!(corners.contains(&expected), "missing corner {expected:?}");
        }
        // z=1, w=1 on every vertex.
        for v in QUAD_VERTICES.chunks_exact(4) {
            assert_eq!((v[2], v[3]), (1.0, 1.0));
        }
    }
}
