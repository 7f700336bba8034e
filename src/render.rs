use bytemuck::{Pod, Zeroable};
use life_view::{Config, Damage, Grid};
use std::num::NonZeroU64;
use std::ops::Range;

/// Above this share of damaged cells the whole grid is uploaded at once.
const FULL_UPLOAD_RATIO: usize = 8;

// Grid geometry, fixed for the lifetime of the window
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct GridParams {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub header_height: u32,
}

impl GridParams {
    pub fn new(config: &Config) -> Self {
        Self {
            width: config.grid_width() as u32,
            height: config.grid_height() as u32,
            cell_size: config.cell_size,
            header_height: config.header_height,
        }
    }
}

// Uniforms specific to rendering, rewritten every frame
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct RenderParams {
    pub live_color: [f32; 4],
    pub dead_color: [f32; 4],
    pub hover_color: [f32; 4],
    pub hover: [i32; 2],
    pub _padding: [i32; 2], // Round the struct up to 16-byte alignment
}

impl RenderParams {
    pub fn new(config: &Config, hover: Option<(usize, usize)>) -> Self {
        let hover = match hover {
            Some((x, y)) => [x as i32, y as i32],
            None => [-1, -1],
        };
        Self {
            live_color: config.live_color,
            dead_color: config.dead_color,
            hover_color: config.hover_color,
            hover,
            _padding: [0, 0],
        }
    }
}

pub fn create_render_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Render Bind Group Layout"),
        entries: &[
            // GridParams Uniform (Binding 0)
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<GridParams>() as u64),
                },
                count: None,
            },
            // Cell State Buffer (Binding 1)
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
            // RenderParams Uniform (Binding 2)
            wgpu::BindGroupLayoutEntry {
                binding: 2,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<RenderParams>() as u64),
                },
                count: None,
            },
        ],
    })
}

pub fn create_render_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    cell_buffer: &wgpu::Buffer,
    grid_param_buffer: &wgpu::Buffer,
    render_param_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Render Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: grid_param_buffer.as_entire_binding() },
            wgpu::BindGroupEntry { binding: 1, resource: cell_buffer.as_entire_binding() },
            wgpu::BindGroupEntry { binding: 2, resource: render_param_buffer.as_entire_binding() },
        ],
    })
}

pub fn create_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Render Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("render.wgsl").into()),
    });
    let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Render Pipeline Layout"),
        bind_group_layouts: &[layout],
        push_constant_ranges: &[],
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Render Pipeline"),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: "vs_main",
            buffers: &[],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: "fs_main",
            targets: &[Some(format.into())],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}

/// Storage buffer holding one `u32` per cell, row-major.
pub fn create_cell_buffer(device: &wgpu::Device, grid: &Grid) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Cell Buffer"),
        size: (grid.cells().len().max(1) * std::mem::size_of::<u32>()) as u64,
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

/// Cells as the shader reads them: 1 for alive, 0 for dead.
pub fn encode_cells(cells: &[bool]) -> Vec<u32> {
    cells.iter().map(|&alive| alive as u32).collect()
}

/// Collapse a list of dirty cell indices into sorted, disjoint runs of
/// consecutive indices.
pub fn dirty_runs(mut cells: Vec<usize>) -> Vec<Range<usize>> {
    cells.sort_unstable();
    cells.dedup();

    let mut runs: Vec<Range<usize>> = Vec::new();
    for idx in cells {
        match runs.last_mut() {
            Some(run) if run.end == idx => run.end += 1,
            _ => runs.push(idx..idx + 1),
        }
    }
    runs
}

/// Bring the GPU copy of the grid up to date with `damage`.
pub fn upload_damage(queue: &wgpu::Queue, cell_buffer: &wgpu::Buffer, grid: &Grid, damage: Damage) {
    let cells = grid.cells();
    match damage {
        Damage::None => {}
        Damage::Cells(dirty) if dirty.len() * FULL_UPLOAD_RATIO < cells.len() => {
            let runs = dirty_runs(dirty);
            log::trace!("Uploading {} dirty runs", runs.len());
            for run in runs {
                let offset = (run.start * std::mem::size_of::<u32>()) as u64;
                queue.write_buffer(cell_buffer, offset, bytemuck::cast_slice(&encode_cells(&cells[run])));
            }
        }
        Damage::Full | Damage::Cells(_) => {
            queue.write_buffer(cell_buffer, 0, bytemuck::cast_slice(&encode_cells(cells)));
        }
    }
}
