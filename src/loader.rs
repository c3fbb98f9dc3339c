use include_dir::{Dir, include_dir};

use crate::config::Config;
use crate::device::{BufferKind, Device, MinFilter};
use crate::error::RenderError;

static ASSETS: Dir = include_dir!("$CARGO_MANIFEST_DIR/assets");

/// Fixed vertex layout shared by every mesh and technique.
pub const ATTR_POSITION: u32 = 0;
pub const ATTR_TEX_COORD: u32 = 1;
pub const ATTR_NORMAL: u32 = 2;

/// Device-side mesh ready for drawing: the vertex array holding its
/// attribute buffers plus the element count for the draw call. The
/// [`Loader`] that produced it owns the underlying handles.
pub struct UploadedMesh<D: Device> {
    vertex_array: D::VertexArray,
    index_count: usize,
}

impl<D: Device> UploadedMesh<D> {
    pub fn vertex_array(&self) -> D::VertexArray {
        self.vertex_array
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }
}

impl<D: Device> Clone for UploadedMesh<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D: Device> Copy for UploadedMesh<D> {}

impl<D: Device> std::fmt::Debug for UploadedMesh<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedMesh")
            .field("index_count", &self.index_count)
            .finish()
    }
}

/// Turns raw mesh and texture data into bound device objects and keeps the
/// full inventory of every handle it created, so shutdown can tear all of
/// them down in one pass. The scene's resource set is static for the
/// process lifetime; nothing is ever released individually.
pub struct Loader<D: Device> {
    vertex_arrays: Vec<D::VertexArray>,
    buffers: Vec<D::Buffer>,
    textures: Vec<D::Texture>,
    config: Config,
}

impl<D: Device> Loader<D> {
    pub fn new(config: Config) -> Self {
        Self {
            vertex_arrays: Vec::new(),
            buffers: Vec::new(),
            textures: Vec::new(),
            config,
        }
    }

    /// Uploads an indexed mesh: positions, texture coordinates and normals
    /// land in attribute slots 0/1/2 of a fresh vertex array, indices in an
    /// element buffer. All four arrays must describe the same vertex count.
    pub fn upload_mesh(
        &mut self,
        gl: &D,
        positions: &[f32],
        texture_coords: &[f32],
        normals: &[f32],
        indices: &[u32],
    ) -> Result<UploadedMesh<D>, RenderError> {
        debug_assert_eq!(positions.len() % 3, 0, "positions are 3 floats per vertex");
        let vertex_count = positions.len() / 3;
        debug_assert_eq!(
            texture_coords.len(),
            vertex_count * 2,
            "texture coords out of step with positions"
        );
        debug_assert_eq!(
            normals.len(),
            vertex_count * 3,
            "normals out of step with positions"
        );

        let vertex_array = self.create_vertex_array(gl)?;
        self.upload_indices(gl, indices)?;
        self.store_attribute(gl, ATTR_POSITION, 3, positions)?;
        self.store_attribute(gl, ATTR_TEX_COORD, 2, texture_coords)?;
        self.store_attribute(gl, ATTR_NORMAL, 3, normals)?;
        gl.bind_vertex_array(None);

        log::debug!(
            "uploaded mesh: {} vertices, {} indices",
            vertex_count,
            indices.len()
        );

        Ok(UploadedMesh {
            vertex_array,
            index_count: indices.len(),
        })
    }

    /// Position-only variant for caller-packed geometry. Only slot 0 is
    /// populated; the result is drawn as a non-indexed stream of
    /// `vertex_count` vertices.
    pub fn upload_positions(
        &mut self,
        gl: &D,
        positions: &[f32],
        vertex_count: usize,
    ) -> Result<UploadedMesh<D>, RenderError> {
        debug_assert_eq!(
            positions.len(),
            vertex_count * 3,
            "positions are 3 floats per vertex"
        );

        let vertex_array = self.create_vertex_array(gl)?;
        self.store_attribute(gl, ATTR_POSITION, 3, positions)?;
        gl.bind_vertex_array(None);

        Ok(UploadedMesh {
            vertex_array,
            index_count: vertex_count,
        })
    }

    /// Loads `<name>.png` from the embedded asset bundle and uploads it as
    /// an RGBA texture. With mipmapping configured on, the mip chain is
    /// generated and minification switches to linear-mipmap-nearest.
    pub fn load_texture(&mut self, gl: &D, name: &str) -> Result<D::Texture, RenderError> {
        let path = format!("{name}.png");
        let file = ASSETS
            .get_file(&path)
            .ok_or_else(|| RenderError::MissingAsset(path.clone()))?;
        let img = image::load_from_memory(file.contents())
            .map_err(|source| RenderError::TextureDecode {
                name: name.to_owned(),
                source,
            })?
            .into_rgba8();

        let texture = gl.create_texture()?;
        self.textures.push(texture);
        gl.bind_texture(Some(texture));
        gl.upload_texture_rgba(img.width() as i32, img.height() as i32, &img);
        if self.config.mipmapping {
            gl.generate_mipmaps();
            gl.set_min_filter(MinFilter::LinearMipmapNearest);
        }

        log::debug!("loaded texture '{}' ({}x{})", name, img.width(), img.height());

        Ok(texture)
    }

    /// Deletes every vertex array, buffer and texture ever recorded, once.
    /// Call at shutdown, after the last draw.
    pub fn clean_up(&mut self, gl: &D) {
        for vertex_array in self.vertex_arrays.drain(..) {
            gl.delete_vertex_array(vertex_array);
        }
        for buffer in self.buffers.drain(..) {
            gl.delete_buffer(buffer);
        }
        for texture in self.textures.drain(..) {
            gl.delete_texture(texture);
        }
    }

    fn create_vertex_array(&mut self, gl: &D) -> Result<D::VertexArray, RenderError> {
        let vertex_array = gl.create_vertex_array()?;
        self.vertex_arrays.push(vertex_array);
        gl.bind_vertex_array(Some(vertex_array));
        Ok(vertex_array)
    }

    fn upload_indices(&mut self, gl: &D, indices: &[u32]) -> Result<(), RenderError> {
        let buffer = gl.create_buffer()?;
        self.buffers.push(buffer);
        gl.bind_buffer(BufferKind::ElementArray, Some(buffer));
        gl.buffer_data(BufferKind::ElementArray, bytemuck::cast_slice(indices));
        Ok(())
    }

    fn store_attribute(
        &mut self,
        gl: &D,
        slot: u32,
        components: i32,
        data: &[f32],
    ) -> Result<(), RenderError> {
        let buffer = gl.create_buffer()?;
        self.buffers.push(buffer);
        gl.bind_buffer(BufferKind::Array, Some(buffer));
        gl.buffer_data(BufferKind::Array, bytemuck::cast_slice(data));
        gl.vertex_attrib_pointer(slot, components, 0, 0);
        gl.enable_vertex_attrib_array(slot);
        gl.bind_buffer(BufferKind::Array, None);
        Ok(())
    }
}

impl<D: Device> std::fmt::Debug for Loader<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Loader")
            .field("vertex_arrays", &self.vertex_arrays.len())
            .field("buffers", &self.buffers.len())
            .field("textures", &self.textures.len())
            .finish()
    }
}
