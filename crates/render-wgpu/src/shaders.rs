/// WGSL program for the lit cube.
///
/// Per-vertex brightness from a directional light; the fragment stage adds
/// the ambient term. Only `model_view` touches the normal.
pub const CUBE_SHADER: &str = r#"
struct SceneUniforms {
    projection_y: mat4x4<f32>,
    projection_z: mat4x4<f32>,
    perspective: mat4x4<f32>,
    model_view: mat4x4<f32>,
    light_direction: vec3<f32>,
    ambient_color: vec3<f32>,
    light_color: vec3<f32>,
};

@group(0) @binding(0)
var<uniform> scene: SceneUniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) brightness: f32,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let light_direction = normalize(scene.light_direction);
    let mv = scene.model_view;
    let normal = mat3x3<f32>(mv[0].xyz, mv[1].xyz, mv[2].xyz) * vertex.normal;

    var clip = scene.perspective * mv * scene.projection_y * scene.projection_z
        * vec4<f32>(vertex.position, 1.0);
    // GL clip z spans [-w, w]; wgpu clips to [0, w].
    clip.z = (clip.z + clip.w) * 0.5;

    var out: VertexOutput;
    out.clip_position = clip;
    out.brightness = max(dot(light_direction, normal), 0.0);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(scene.ambient_color + scene.light_color * in.brightness, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_parses_and_validates() {
        let module = naga::front::wgsl::parse_str(CUBE_SHADER)
            .unwrap_or_else(|e| panic!("{}", e.emit_to_string(CUBE_SHADER)));
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        )
        .validate(&module)
        .unwrap();

        let stages: Vec<_> = module
            .entry_points
            .iter()
            .map(|ep| (ep.name.as_str(), ep.stage))
            .collect();
        assert!(stages.contains(&("vs_main", naga::ShaderStage::Vertex)));
        assert!(stages.contains(&("fs_main", naga::ShaderStage::Fragment)));
    }

    #[test]
    fn declares_every_uniform() {
        for name in [
            "projection_y",
            "projection_z",
            "perspective",
            "model_view",
            "light_direction",
            "ambient_color",
            "light_color",
        ] {
            assert!(CUBE_SHADER.contains(&format!("    {name}: ")), "missing {name}");
        }
    }

    #[test]
    fn multiplies_in_fixed_order() {
        assert!(CUBE_SHADER.contains(
            "scene.perspective * mv * scene.projection_y * scene.projection_z"
        ));
    }

    #[test]
    fn has_both_entry_points() {
        assert!(CUBE_SHADER.contains("fn vs_main("));
        assert!(CUBE_SHADER.contains("fn fs_main("));
    }
}
