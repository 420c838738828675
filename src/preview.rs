//! Flight-line previews for debug overlays.
//!
//! A [`PathPreview`] is a closed line strip sampled evenly by distance along
//! a [`DronePath`], plus a marker vertex per control point. Vertices are
//! plain `#[repr(C)]` data, so they can be uploaded to the GPU as-is.
//!
//! # Vertex Layout
//!
//! | Attribute | Format    | Offset | Shader Location |
//! |-----------|-----------|--------|-----------------|
//! | position  | Float32x3 | 0      | 0               |
//! | progress  | Float32   | 12     | 1               |

use glam::Vec3;

use crate::path::DronePath;

/// One point of a preview line.
///
/// `progress` is the fraction of the loop at this vertex, which lets a shader
/// fade or colour the line by distance along the path.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PreviewVertex {
    pub position: [f32; 3],
    pub progress: f32,
}

impl PreviewVertex {
    pub fn new(position: Vec3, progress: f32) -> Self {
        Self {
            position: position.to_array(),
            progress,
        }
    }

    /// The wgpu vertex buffer layout for [`PreviewVertex`].
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<PreviewVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // progress
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32,
            },
        ],
    };
}

/// Sampled flight line and control-point markers for one path.
#[derive(Clone, Debug, Default)]
pub struct PathPreview {
    vertices: Vec<PreviewVertex>,
    markers: Vec<PreviewVertex>,
}

impl PathPreview {
    /// Samples `path` at `samples` even distances. The first vertex is
    /// repeated at the end so the strip closes. `samples` is raised to at
    /// least 2.
    pub fn from_path(path: &DronePath, samples: usize) -> Self {
        if !path.is_flyable() {
            return Self::default();
        }

        let samples = samples.max(2);
        let length = path.length();
        let mut vertices: Vec<PreviewVertex> = (0..samples)
            .map(|i| {
                let progress = i as f32 / samples as f32;
                PreviewVertex::new(path.point_at(progress * length), progress)
            })
            .collect();
        if let Some(&first) = vertices.first() {
            vertices.push(PreviewVertex { progress: 1.0, ..first });
        }

        let markers = path
            .points()
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                let u = i as f32 / path.points().len() as f32;
                PreviewVertex::new(p, path.table().length_at(u) / path.raw_length())
            })
            .collect();

        Self { vertices, markers }
    }

    /// Line-strip vertices, closed.
    pub fn vertices(&self) -> &[PreviewVertex] {
        &self.vertices
    }

    /// One vertex per control point.
    pub fn markers(&self) -> &[PreviewVertex] {
        &self.markers
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Uploads the line strip into a new vertex buffer.
    pub fn upload(&self, device: &wgpu::Device) -> wgpu::Buffer {
        use wgpu::util::DeviceExt;

        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Drone Path Preview Buffer"),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> DronePath {
        DronePath::new(vec![
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(30.0, 0.0, 10.0),
            Vec3::new(30.0, 30.0, 14.0),
            Vec3::new(0.0, 30.0, 14.0),
        ])
        .unwrap()
    }

    #[test]
    fn layout_matches_struct() {
        assert_eq!(std::mem::size_of::<PreviewVertex>(), 16);
        assert_eq!(PreviewVertex::LAYOUT.array_stride, 16);
        let vertex = [PreviewVertex::new(Vec3::ONE, 0.5)];
        let bytes: &[u8] = bytemuck::cast_slice(&vertex);
        assert_eq!(bytes.len(), 16);
    }

    #[test]
    fn strip_is_closed_and_evenly_spaced() {
        let path = path();
        let preview = PathPreview::from_path(&path, 128);
        let vertices = preview.vertices();
        assert_eq!(vertices.len(), 129);
        assert_eq!(vertices[0].position, vertices[128].position);
        assert_eq!(vertices[128].progress, 1.0);

        let step = path.length() / 128.0;
        for pair in vertices.windows(2) {
            let a = Vec3::from_array(pair[0].position);
            let b = Vec3::from_array(pair[1].position);
            // Chords are never longer than the arc they span.
            assert!(a.distance(b) <= step * 1.01);
        }
    }

    #[test]
    fn markers_track_control_points() {
        let path = path();
        let preview = PathPreview::from_path(&path, 16);
        assert_eq!(preview.markers().len(), 4);
        assert_eq!(preview.markers()[0].progress, 0.0);
        assert!(preview.markers().windows(2).all(|w| w[1].progress > w[0].progress));
    }

    #[test]
    fn unflyable_path_has_no_preview() {
        let preview = PathPreview::from_path(&DronePath::default(), 16);
        assert!(preview.is_empty());
        assert!(preview.markers().is_empty());
    }
}
