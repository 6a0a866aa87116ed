// Configuration file, scene units are arbitrary (1 unit ~ sphere radius)
// These values are fixed at startup, nothing here is tuned at runtime

// Seeds
pub const INITIAL_SEED: u64 = 1512086461918454205;
pub const RESEED_EACH_RUN: bool = false; // true -> entropy seed, displaced shape differs per run

// Sphere surface that gets sampled for the point cloud
pub const SPHERE_RADIUS: f32 = 1.0;
pub const SPHERE_SECTORS: u32 = 64;  // width segments
pub const SPHERE_STACKS: u32 = 64;   // height segments

// Spike displacement, magnitude = MIN + SPAN * u, u in [0, 1)
pub const DISPLACEMENT_MIN: f32 = 2.0;
pub const DISPLACEMENT_SPAN: f32 = 3.0;

// Morph animation
pub const BLEND_START: f32 = 1.0;         // 1 = fully spiked
pub const BLEND_DECAY_RATE: f32 = 0.01;   // multiplied by absolute elapsed time every frame
pub const CLOUD_SPIN_RATE: f32 = 0.2;     // rad per elapsed second once settled

// Point cloud
pub const CLOUD_POSITION: [f32; 3] = [1.0, 2.0, 3.0];
pub const CLOUD_COLOR: u32 = 0x00afaf;

// Displaced plane
pub const PLANE_SIZE: f32 = 3.0;
pub const PLANE_SEGMENTS: u32 = 64;
pub const PLANE_HEIGHT: f32 = 0.3;               // y offset
pub const PLANE_TILT: f32 = 300.0;               // radians about x, kept as-is
pub const PLANE_SPIN_RATE: f32 = 0.2;            // rad per elapsed second about z
pub const PLANE_ALPHA: f32 = 0.85;
pub const PLANE_INITIAL_INTENSITY: f32 = 0.8;
pub const INTENSITY_MIN: f32 = 0.5;              // resample range [MIN, MAX)
pub const INTENSITY_MAX: f32 = 1.0;
pub const HEIGHT_LATTICE: usize = 8;             // value-noise cells per side

// Depth-shaded cylinder
pub const CYLINDER_RADIUS: f32 = 2.0;
pub const CYLINDER_HEIGHT: f32 = 0.5;
pub const CYLINDER_RESOLUTION: u32 = 64;
pub const CYLINDER_SEGMENTS: u32 = 64;
pub const DEPTH_FOG_START: f32 = 2.0;
pub const DEPTH_FOG_END: f32 = 12.0;

// Point light
pub const LIGHT_COLOR: u32 = 0x00b3ff;
pub const LIGHT_POSITION: [f32; 3] = [0.0, 5.0, 0.0];
pub const LIGHT_INTENSITY: f32 = 250_000.0;      // lumens
pub const LIGHT_RANGE: f32 = 30.0;
pub const LIGHT_HELPER_RADIUS: f32 = 1.0;
pub const LIGHT_SLIDER_MIN: f32 = 0.0;
pub const LIGHT_SLIDER_MAX: f32 = 10.0;
pub const PICKER_INITIAL_COLOR: [u8; 3] = [0x00, 0xff, 0x00];

// Camera
pub const CAMERA_START: [f32; 3] = [4.0, 4.0, 0.0];
pub const CAMERA_SECONDS_PER_TURN: f32 = 12.0;
pub const CAMERA_HEIGHT_MIN: f32 = 1.0;
pub const CAMERA_HEIGHT_MAX: f32 = 20.0;
