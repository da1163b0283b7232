//! Draw list construction.
//!
//! Rendering is split in two: [`draw_list`] reads the world and produces
//! backend-independent [`DrawCommand`]s, and the window frontend (behind the
//! `raylib` feature) only blits them. Entities are drawn when registered with
//! [`RenderSystem`] and their texture is loaded in the
//! [`AssetStore`].
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::warn;

use crate::components::renderable::Renderable;
use crate::components::space::Space;
use crate::components::zindex::ZIndex;
use crate::resources::assets::AssetStore;
use crate::resources::registry::{RegisteredSystem, SystemRegistry};

/// Entities that end up on screen.
pub struct RenderSystem;

impl RegisteredSystem for RenderSystem {
    const KEY: &'static str = "render";
    type Requires = (With<Space>, With<Renderable>);
}

/// One textured quad.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub tex_key: String,
    /// Top-left of the source cell inside the texture.
    pub source_origin: Vec2,
    pub source_size: Vec2,
    /// Top-left of the destination in world pixels.
    pub position: Vec2,
    /// Source cell size times the renderable's scale.
    pub size: Vec2,
    pub z: ZIndex,
}

/// Build the frame's draw commands, back to front.
///
/// Ties in [`ZIndex`] keep registry order. Entities without a `ZIndex` sit at
/// zero.
pub fn draw_list(world: &mut World) -> Vec<DrawCommand> {
    let members: Vec<Entity> = world
        .resource::<SystemRegistry>()
        .entities_of::<RenderSystem>()
        .to_vec();

    let mut query = world.query::<(&Space, &Renderable, Option<&ZIndex>)>();
    let world: &World = world;
    let assets = world.resource::<AssetStore>();

    let mut commands = Vec::with_capacity(members.len());
    for entity in members {
        let Ok((space, renderable, z)) = query.get(world, entity) else {
            continue;
        };
        let Some(sheet) = assets.sheet(&renderable.tex_key) else {
            warn!("No texture '{}' for {:?}", renderable.tex_key, entity);
            continue;
        };
        let Some((sx, sy)) = sheet.cell_origin(renderable.cell) else {
            warn!(
                "Cell {} out of range for texture '{}'",
                renderable.cell, renderable.tex_key
            );
            continue;
        };
        let source_size = Vec2::new(sheet.cell_width as f32, sheet.cell_height as f32);
        commands.push(DrawCommand {
            tex_key: renderable.tex_key.clone(),
            source_origin: Vec2::new(sx as f32, sy as f32),
            source_size,
            position: space.position,
            size: source_size * renderable.scale,
            z: z.copied().unwrap_or_default(),
        });
    }

    commands.sort_by_key(|command| command.z);
    commands
}
