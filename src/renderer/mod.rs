pub mod mesh;
pub mod shader;

use glam::Vec3;
use mesh::Mesh;
use shader::ShaderProgram;
use tracing::{info, warn};

use crate::components::MeshHandle;
use crate::error::EngineError;
use crate::world::RenderFrame;

const VERT_SRC: &str = include_str!("../../shaders/flat.vert");
const FRAG_SRC: &str = include_str!("../../shaders/flat.frag");

const CLEAR_COLOR: Vec3 = Vec3::new(0.1, 0.1, 0.15);
const LIGHT_DIR: Vec3 = Vec3::new(-0.5, -1.0, -0.3);
const AMBIENT: f32 = 0.2;

/// Colour per `texture_id`. Ids past the end wrap around.
const PALETTE: [Vec3; 6] = [
    Vec3::new(0.45, 0.47, 0.5),
    Vec3::new(0.32, 0.55, 0.3),
    Vec3::new(0.7, 0.52, 0.3),
    Vec3::new(0.75, 0.25, 0.2),
    Vec3::new(0.25, 0.4, 0.75),
    Vec3::new(0.85, 0.8, 0.35),
];

pub fn palette_color(texture_id: u8) -> Vec3 {
    PALETTE[texture_id as usize % PALETTE.len()]
}

/// Holds all loaded meshes. Objects reference meshes by MeshHandle index.
#[derive(Default)]
pub struct MeshStore {
    meshes: Vec<Mesh>,
}

impl MeshStore {
    pub fn new() -> Self {
        Self { meshes: Vec::new() }
    }

    pub fn add(&mut self, mesh: Mesh) -> MeshHandle {
        let handle = MeshHandle(self.meshes.len());
        self.meshes.push(mesh);
        handle
    }

    pub fn get(&self, handle: MeshHandle) -> Option<&Mesh> {
        self.meshes.get(handle.0)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

pub struct Renderer {
    shader: ShaderProgram,
    missing_mesh_reported: bool,
}

impl Renderer {
    /// Needs a current GL context.
    pub fn init() -> Result<Self, EngineError> {
        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            gl::ClearColor(CLEAR_COLOR.x, CLEAR_COLOR.y, CLEAR_COLOR.z, 1.0);
        }
        let shader = ShaderProgram::from_sources(VERT_SRC, FRAG_SRC)?;
        info!("renderer initialised");
        Ok(Self {
            shader,
            missing_mesh_reported: false,
        })
    }

    pub fn draw_frame(&mut self, frame: &RenderFrame, meshes: &MeshStore) {
        let (width, height) = frame.resolution;
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }

        self.shader.bind();
        self.shader.set_mat4("u_view", &frame.view);
        self.shader.set_mat4("u_projection", &frame.projection);
        self.shader.set_vec3("u_light_dir", LIGHT_DIR);
        self.shader.set_vec3("u_camera_pos", frame.camera_location);
        self.shader.set_float("u_ambient", AMBIENT);

        for item in &frame.items {
            let Some(mesh) = meshes.get(item.mesh) else {
                if !self.missing_mesh_reported {
                    warn!(mesh = item.mesh.0, "render item references an unknown mesh");
                    self.missing_mesh_reported = true;
                }
                continue;
            };
            self.shader.set_mat4("u_model", &item.model);
            self.shader.set_vec3("u_object_color", palette_color(item.texture_id));
            mesh.draw();
        }
    }
}
