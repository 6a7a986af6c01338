use wgpu::{Buffer, BufferUsages, Device, Queue};

use throttled_life::config::{CELL_SIZE, DEAD_COLOR, LIVE_COLOR};

/// Storage buffer with one `u32` per cell plus the render uniform.
///
/// Recreated whenever the grid dimensions change.
pub struct GridBuffers {
    pub cells_buffer: Buffer,
    pub render_params_buffer: Buffer,
    pub width: u32,
    pub height: u32,
}

/// Render parameters passed to the fragment shader (48 bytes, aligned to 16)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RenderParams {
    // Grid info (16 bytes)
    pub grid_width: u32,
    pub grid_height: u32,
    pub cell_size: f32,
    pub _padding: f32,

    // Colors (32 bytes)
    pub live_color: [f32; 4],
    pub dead_color: [f32; 4],
}

impl GridBuffers {
    /// Create buffers sized for `width x height` and upload the initial cells
    pub fn new(device: &Device, queue: &Queue, width: u32, height: u32, cells: &[u32]) -> Self {
        debug_assert_eq!(cells.len(), (width * height) as usize);

        // Empty storage bindings are invalid, keep at least one word.
        let cell_words = (width as u64 * height as u64).max(1);

        let cells_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("grid-cells-buffer"),
            size: cell_words * std::mem::size_of::<u32>() as u64,
            usage: BufferUsages::STORAGE | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let render_params_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("render-params-buffer"),
            size: std::mem::size_of::<RenderParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let buffers = Self {
            cells_buffer,
            render_params_buffer,
            width,
            height,
        };
        buffers.upload_cells(queue, cells);
        buffers.update_render_params(queue);
        buffers
    }

    /// Overwrite the cell buffer with a new generation
    pub fn upload_cells(&self, queue: &Queue, cells: &[u32]) {
        if !cells.is_empty() {
            queue.write_buffer(&self.cells_buffer, 0, bytemuck::cast_slice(cells));
        }
    }

    pub fn update_render_params(&self, queue: &Queue) {
        let params = RenderParams {
            grid_width: self.width,
            grid_height: self.height,
            cell_size: CELL_SIZE as f32,
            _padding: 0.0,
            live_color: LIVE_COLOR,
            dead_color: DEAD_COLOR,
        };
        queue.write_buffer(&self.render_params_buffer, 0, bytemuck::bytes_of(&params));
    }

    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }
}
