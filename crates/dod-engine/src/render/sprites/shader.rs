use std::borrow::Cow;

/// Supplies the shader program for [`SpriteRenderer`](super::SpriteRenderer).
///
/// Interface the program must implement:
/// - vertex inputs: location 0 `vec3<f32>` (x, y, scale), location 1 `vec4<f32>` color,
///   plus `@builtin(vertex_index)` in `0..4` from the quad index buffer
/// - group 0: binding 0 uniform `{ aspect: f32, pad x3 }` (vertex),
///   binding 1 `texture_2d<f32>`, binding 2 filtering sampler (fragment)
/// - one color output
pub trait SpriteShader {
    fn label(&self) -> &'static str;

    fn source(&self) -> wgpu::ShaderSource<'static>;

    fn vertex_entry(&self) -> &'static str {
        "vs_main"
    }

    fn fragment_entry(&self) -> &'static str {
        "fs_main"
    }
}

/// WGSL program; wgpu translates it for Metal, D3D12, Vulkan and GL alike.
#[derive(Debug, Copy, Clone, Default)]
pub struct WgslSpriteShader;

impl WgslSpriteShader {
    pub const SOURCE: &'static str = include_str!("shaders/sprite.wgsl");
}

impl SpriteShader for WgslSpriteShader {
    fn label(&self) -> &'static str {
        "dod sprite shader"
    }

    fn source(&self) -> wgpu::ShaderSource<'static> {
        wgpu::ShaderSource::Wgsl(Cow::Borrowed(Self::SOURCE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wgsl_declares_default_entry_points() {
        let shader = WgslSpriteShader;
        let src = WgslSpriteShader::SOURCE;
        assert!(src.contains(&format!("fn {}(", shader.vertex_entry())));
        assert!(src.contains(&format!("fn {}(", shader.fragment_entry())));
    }

    #[test]
    fn wgsl_matches_instance_layout() {
        let src = WgslSpriteShader::SOURCE;
        assert!(src.contains("@location(0) posscale: vec3<f32>"));
        assert!(src.contains("@location(1) color: vec4<f32>"));
        assert!(src.contains("@builtin(vertex_index)"));
    }

    #[test]
    fn source_is_wgsl() {
        assert!(matches!(WgslSpriteShader.source(), wgpu::ShaderSource::Wgsl(_)));
    }
}
