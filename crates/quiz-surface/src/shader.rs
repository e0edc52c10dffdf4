//! WGSL source for presenting the canvas.

/// Screen quad sampling the canvas texture. Vertex input is clip-space
/// position plus UV; texels are premultiplied and pass through unchanged.
pub const BLIT_WGSL: &str = r#"
struct VsIn {
    @location(0) pos: vec2<f32>,
    @location(1) uv: vec2<f32>,
};

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(inp: VsIn) -> VsOut {
    var out: VsOut;
    out.pos = vec4<f32>(inp.pos, 0.0, 1.0);
    out.uv = inp.uv;
    return out;
}

@group(0) @binding(0) var canvas_tex: texture_2d<f32>;
@group(0) @binding(1) var canvas_smp: sampler;

@fragment
fn fs_main(inp: VsOut) -> @location(0) vec4<f32> {
    return textureSample(canvas_tex, canvas_smp, inp.uv);
}
"#;
