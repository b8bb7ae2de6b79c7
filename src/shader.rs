//! Shader text and the fullscreen quad geometry.

pub const POSITION_ATTRIBUTE: &str = "aPosition";

pub const RESOLUTION_UNIFORM: &str = "iResolution";
pub const TIME_UNIFORM: &str = "iTime";
pub const HUE_UNIFORM: &str = "uHue";
pub const SPEED_UNIFORM: &str = "uSpeed";
pub const INTENSITY_UNIFORM: &str = "uIntensity";
pub const SIZE_UNIFORM: &str = "uSize";

/// Components per vertex in [`FULLSCREEN_QUAD`].
pub const QUAD_COMPONENTS: i32 = 2;
pub const QUAD_VERTEX_COUNT: i32 = 6;

/// Two triangles spanning clip space `[-1, 1] x [-1, 1]`.
#[rustfmt::skip]
pub const FULLSCREEN_QUAD: [f32; 12] = [
    -1.0, -1.0,
     1.0, -1.0,
    -1.0,  1.0,
    -1.0,  1.0,
     1.0, -1.0,
     1.0,  1.0,
];

pub const VERTEX_SHADER_SOURCE: &str = r"
attribute vec2 aPosition;
void main() {
  gl_Position = vec4(aPosition, 0.0, 1.0);
}
";

/// Fractal-noise displaced horizon line, tinted by `uHue` (degrees).
pub const FRAGMENT_SHADER_SOURCE: &str = r"
precision mediump float;
uniform vec2 iResolution;
uniform float iTime;
uniform float uHue;
uniform float uSpeed;
uniform float uIntensity;
uniform float uSize;

#define OCTAVE_COUNT 10

vec3 hsv2rgb(vec3 c) {
  vec3 rgb = clamp(abs(mod(c.x * 6.0 + vec3(0.0, 4.0, 2.0), 6.0) - 3.0) - 1.0, 0.0, 1.0);
  return c.z * mix(vec3(1.0), rgb, c.y);
}

float hash12(vec2 p) {
  vec3 p3 = fract(vec3(p.xyx) * .1031);
  p3 += dot(p3, p3.yzx + 33.33);
  return fract((p3.x + p3.y) * p3.z);
}

float noise(vec2 p) {
  vec2 i = floor(p);
  vec2 f = fract(p);
  float a = hash12(i);
  float b = hash12(i + vec2(1.0, 0.0));
  float c = hash12(i + vec2(0.0, 1.0));
  float d = hash12(i + vec2(1.0, 1.0));
  vec2 u = f * f * (3.0 - 2.0 * f);
  return mix(a, b, u.x) + (c - a) * u.y * (1.0 - u.x) + (d - b) * u.x * u.y;
}

float fbm(vec2 p) {
  float v = 0.0;
  float a = 0.5;
  for (int i = 0; i < OCTAVE_COUNT; ++i) {
    v += a * noise(p);
    p *= 2.0;
    a *= 0.5;
  }
  return v;
}

void mainImage(out vec4 fragColor, in vec2 fragCoord) {
  vec2 uv = fragCoord / iResolution.xy;
  uv = 2.0 * uv - 1.0;
  uv.x *= iResolution.x / iResolution.y;
  uv += vec2(0.0, fbm(uv * uSize + iTime * uSpeed));
  float brightness = pow(0.3 / abs(uv.y), uIntensity);
  vec3 col = hsv2rgb(vec3(uHue / 360.0, 0.7, 0.8)) * brightness;
  fragColor = vec4(col, 1.0);
}

void main() {
  mainImage(gl_FragColor, gl_FragCoord.xy);
}
";
