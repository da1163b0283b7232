//! Raylib window frontend.
//!
//! Owns the window, answers key queries for
//! [`update_input_state`](crate::systems::input::update_input_state) and
//! blits the world's [`draw_list`] every frame. Textures are uploaded lazily
//! the first time a sprite sheet key shows up in the draw list and dropped
//! when the asset cache no longer knows the key.
use bevy_ecs::prelude::*;
use log::{error, info, warn};
use raylib::ffi::KeyboardKey;
use raylib::prelude::*;
use rustc_hash::FxHashMap;

use crate::game::run_frame;
use crate::resources::assets::AssetStore;
use crate::resources::background::Background;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::Key;
use crate::scenes::SceneError;
use crate::systems::input::KeySource;
use crate::systems::render::{DrawCommand, draw_list};

fn keyboard_key(key: Key) -> KeyboardKey {
    match key {
        Key::Up => KeyboardKey::KEY_UP,
        Key::Down => KeyboardKey::KEY_DOWN,
        Key::Left => KeyboardKey::KEY_LEFT,
        Key::Right => KeyboardKey::KEY_RIGHT,
        Key::W => KeyboardKey::KEY_W,
        Key::A => KeyboardKey::KEY_A,
        Key::S => KeyboardKey::KEY_S,
        Key::D => KeyboardKey::KEY_D,
    }
}

impl KeySource for RaylibHandle {
    fn is_key_down(&self, key: Key) -> bool {
        RaylibHandle::is_key_down(self, keyboard_key(key))
    }
}

/// GPU textures keyed like the sprite sheets in [`AssetStore`].
#[derive(Default)]
struct TextureStore {
    map: FxHashMap<String, Texture2D>,
}

impl TextureStore {
    /// Upload every texture the draw list needs and forget stale ones.
    fn sync(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        assets: &AssetStore,
        commands: &[DrawCommand],
    ) {
        self.map.retain(|key, _| assets.sheet(key).is_some());
        for command in commands {
            if self.map.contains_key(&command.tex_key) {
                continue;
            }
            let Some(sheet) = assets.sheet(&command.tex_key) else {
                continue;
            };
            match rl.load_texture(thread, &sheet.path.to_string_lossy()) {
                Ok(texture) => {
                    self.map.insert(command.tex_key.clone(), texture);
                }
                Err(err) => {
                    warn!("Failed to upload texture '{}': {}", command.tex_key, err);
                }
            }
        }
    }
}

fn draw(
    d: &mut RaylibDrawHandle,
    textures: &TextureStore,
    background: Background,
    commands: &[DrawCommand],
) {
    let [r, g, b, a] = background.0;
    d.clear_background(Color::new(r, g, b, a));
    for command in commands {
        let Some(texture) = textures.map.get(&command.tex_key) else {
            continue;
        };
        let source = Rectangle {
            x: command.source_origin.x,
            y: command.source_origin.y,
            width: command.source_size.x,
            height: command.source_size.y,
        };
        let dest = Rectangle {
            x: command.position.x,
            y: command.position.y,
            width: command.size.x,
            height: command.size.y,
        };
        d.draw_texture_pro(
            texture,
            source,
            dest,
            Vector2 { x: 0.0, y: 0.0 },
            0.0,
            Color::WHITE,
        );
    }
}

/// Open the window and run until it is closed.
///
/// The world must already be in its first scene.
pub fn run(world: &mut World) -> Result<(), SceneError> {
    let (title, width, height, fps) = {
        let config = world.resource::<GameConfig>();
        (
            config.title.clone(),
            config.window_width,
            config.window_height,
            config.target_fps,
        )
    };

    let (mut rl, thread) = raylib::init()
        .size(width as i32, height as i32)
        .title(&title)
        .build();
    rl.set_target_fps(fps);
    info!("Window '{}' {}x{} at {} fps", title, width, height, fps);

    let mut textures = TextureStore::default();
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        if let Err(err) = run_frame(world, dt, &rl) {
            error!("Scene switch failed: {}", err);
            return Err(err);
        }

        let commands = draw_list(world);
        textures.sync(&mut rl, &thread, world.resource::<AssetStore>(), &commands);
        let background = world
            .get_resource::<Background>()
            .copied()
            .unwrap_or_default();

        let mut d = rl.begin_drawing(&thread);
        draw(&mut d, &textures, background, &commands);
    }
    Ok(())
}
