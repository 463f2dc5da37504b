//! GLSL ES 1.00 shader sources and compile/link helpers.

use glow::HasContext;

use crate::error::SweepError;

/// Pass-through position; texcoord derived from clip space, y flipped so the
/// sweep origin is the top-left of the framebuffer.
pub const VERTEX_SHADER: &str = "\
attribute lowp vec4 vertex;
varying lowp vec2 texcoord;

void main(void) {
    texcoord = vertex.xy * 0.5 + 0.5;
    texcoord.y = 1.0 - texcoord.y;
    gl_Position = vertex;
}
";

/// White left of the sweep boundary, red right of it.
pub const FRAGMENT_SHADER: &str = "\
uniform lowp float sweep;
varying lowp vec2 texcoord;

void main(void) {
    gl_FragColor = texcoord.x < sweep
        ? vec4(1.0, 1.0, 1.0, 1.0)
        : vec4(1.0, 0.0, 0.0, 1.0);
}
";

/// Compile one shader stage, surfacing the driver's info log on failure.
pub fn compile_shader(
    gl: &glow::Context,
    stage: u32,
    source: &str,
) -> Result<glow::Shader, SweepError> {
    unsafe {
        let shader = gl.create_shader(stage).map_err(SweepError::Allocate)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(SweepError::ShaderCompile {
                stage: stage_name(stage),
                log,
            });
        }
        Ok(shader)
    }
}

/// Link the vertex and fragment stages into a program.
pub fn link_program(
    gl: &glow::Context,
    vertex: glow::Shader,
    fragment: glow::Shader,
) -> Result<glow::Program, SweepError> {
    unsafe {
        let program = gl.create_program().map_err(SweepError::Allocate)?;
        gl.attach_shader(program, vertex);
        gl.attach_shader(program, fragment);
        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(SweepError::ProgramLink(log));
        }
        Ok(program)
    }
}

fn stage_name(stage: u32) -> &'static str {
    match stage {
        glow::VERTEX_SHADER => "vertex",
        glow::FRAGMENT_SHADER => "fragment",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // GPU-side compilation needs a live context; these pin the interface the
    // renderer queries against the sources.

    #[test]
    fn sources_declare_the_queried_names() {
        assert!(VERTEX_SHADER.contains("attribute lowp vec4 vertex;"));
        assert!(FRAGMENT_SHADER.contains("uniform lowp float sweep;"));
    }

    #[test]
    fn varying_agrees_between_stages() {
        let decl = "varying lowp vec2 texcoord;";
        assert!(VERTEX_SHADER.contains(decl));
        assert!(FRAGMENT_SHADER.contains(decl));
    }

    #[test]
    fn sources_are_glsl_es_100() {
        // ES 1.00 is the implicit version; a #version directive would reject
        // the lowp-qualified source on ES2 drivers.
        assert!(!VERTEX_SHADER.contains("#version"));
        assert!(!FRAGMENT_SHADER.contains("#version"));
    }

    #[test]
    fn stage_names() {
        assert_eq!(stage_name(glow::VERTEX_SHADER), "vertex");
        assert_eq!(stage_name(glow::FRAGMENT_SHADER), "fragment");
        assert_eq!(stage_name(0), "unknown");
    }
}
