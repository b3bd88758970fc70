//! Texture export of each height-map frame.
//!
//! The heights go into a single-channel `R32Float` image and the colors into
//! an `Rgba32Float` image. Both use mirrored-repeat addressing so the grid
//! and bars meshes can sample past the edge, and take their magnification
//! filter from `HeightMapSettings`.

use bevy::image::{ImageAddressMode, ImageFilterMode, ImageSampler, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};

use heightmap::{ColorField, HeightField, HeightMapFrame, HeightMapSettings, TextureFilter};

/// Handles of the two images rewritten every frame.
#[derive(Resource, Debug, Clone)]
pub struct HeightMapTextures {
    pub height: Handle<Image>,
    pub color: Handle<Image>,
}

fn filter_mode(filter: TextureFilter) -> ImageFilterMode {
    match filter {
        TextureFilter::Linear => ImageFilterMode::Linear,
        TextureFilter::Nearest => ImageFilterMode::Nearest,
    }
}

fn sampler(filter: TextureFilter) -> ImageSampler {
    ImageSampler::Descriptor(ImageSamplerDescriptor {
        address_mode_u: ImageAddressMode::MirrorRepeat,
        address_mode_v: ImageAddressMode::MirrorRepeat,
        mag_filter: filter_mode(filter),
        min_filter: ImageFilterMode::Linear,
        ..default()
    })
}

fn float_image(
    width: usize,
    height: usize,
    data: Vec<u8>,
    format: TextureFormat,
    filter: TextureFilter,
) -> Image {
    let mut image = Image::new(
        Extent3d {
            // Images cannot be empty; an unset frame exports a single texel.
            width: width.max(1) as u32,
            height: height.max(1) as u32,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        format,
        RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
    );
    image.sampler = sampler(filter);
    image
}

/// Build the `R32Float` height texture for `field`.
pub fn height_image(field: &HeightField, filter: TextureFilter) -> Image {
    let mut data: Vec<u8> = field.values.iter().flat_map(|v| v.to_le_bytes()).collect();
    if field.is_empty() {
        data = 0.0f32.to_le_bytes().to_vec();
    }
    float_image(field.width, field.height, data, TextureFormat::R32Float, filter)
}

/// Build the `Rgba32Float` color texture for `field`, alpha 1.
pub fn color_image(field: &ColorField, filter: TextureFilter) -> Image {
    let mut data: Vec<u8> = field
        .to_rgba()
        .iter()
        .flatten()
        .flat_map(|v| v.to_le_bytes())
        .collect();
    if field.values.is_empty() {
        data = [0.0f32, 0.0, 0.0, 1.0]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
    }
    float_image(field.width, field.height, data, TextureFormat::Rgba32Float, filter)
}

// ---------------------------------------------------------------------------
// Systems
// ---------------------------------------------------------------------------

pub fn setup_height_textures(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    frame: Res<HeightMapFrame>,
    settings: Res<HeightMapSettings>,
) {
    let height = images.add(height_image(&frame.height, settings.height_texture_filter));
    let color = images.add(color_image(&frame.color, settings.color_texture_filter));
    commands.insert_resource(HeightMapTextures { height, color });
}

/// Rewrite both images whenever a new frame was exported.
pub fn upload_frame_textures(
    frame: Res<HeightMapFrame>,
    settings: Res<HeightMapSettings>,
    textures: Option<Res<HeightMapTextures>>,
    mut images: ResMut<Assets<Image>>,
) {
    let Some(textures) = textures else {
        return;
    };
    if !frame.is_changed() && !settings.is_changed() {
        return;
    }

    if let Some(image) = images.get_mut(&textures.height) {
        *image = height_image(&frame.height, settings.height_texture_filter);
    } else {
        warn!("Height texture asset missing, skipping upload");
    }
    if let Some(image) = images.get_mut(&textures.color) {
        *image = color_image(&frame.color, settings.color_texture_filter);
    } else {
        warn!("Color texture asset missing, skipping upload");
    }
}
