//! Scene lifecycle integration tests: menu timer, switching, teardown,
//! tile-map levels and fatal startup errors, all on in-memory assets.

use bevy_ecs::observer::{Observer, On};
use bevy_ecs::prelude::*;

use ivo::components::animation::Animation;
use ivo::components::collision::Collision;
use ivo::components::group::Group;
use ivo::components::persistent::Persistent;
use ivo::components::renderable::Renderable;
use ivo::components::sceneswitcher::SceneSwitcher;
use ivo::components::space::Space;
use ivo::events::collision::CollisionEvent;
use ivo::game::{build_world, run_frame, start};
use ivo::resources::assets::{AssetError, AssetStore, InMemoryAssets};
use ivo::resources::background::Background;
use ivo::resources::gameconfig::GameConfig;
use ivo::resources::input::{InputBindings, Key};
use ivo::resources::registry::SystemRegistry;
use ivo::resources::scenestate::SceneState;
use ivo::resources::worldbounds::WorldBounds;
use ivo::scenes::SceneError;
use ivo::systems::control::ControlSystem;
use ivo::systems::input::HeldKeys;
use ivo::systems::render::{RenderSystem, draw_list};
use ivo::systems::scene::{apply_pending_scene, set_scene};

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

const LEVEL: &str = r#"{
  "tile_size": 32,
  "map_width": 10,
  "map_height": 8,
  "tileset": "tiles.png",
  "layers": [
    { "name": "ground", "positions": [
      { "x": 0, "y": 0, "id": 0 },
      { "x": 1, "y": 0, "id": 0 },
      { "x": 2, "y": 0, "id": 1 }
    ] },
    { "name": "walls", "solid": true, "positions": [
      { "x": 4, "y": 3, "id": 1 },
      { "x": 9, "y": 7, "id": 1 }
    ] }
  ],
  "images": [{ "image": "tree.png", "x": 250.0, "y": 10.0 }]
}"#;

fn assets() -> InMemoryAssets {
    InMemoryAssets::new()
        .with_image("icon.png", 16, 16)
        .with_image("hero.png", 208, 288)
        .with_image("tiles.png", 64, 32)
        .with_image("tree.png", 40, 60)
        .with_text("levels/test.json", LEVEL)
}

fn count_group(world: &mut World, name: &str) -> usize {
    world
        .query::<&Group>()
        .iter(world)
        .filter(|g| g.name() == name)
        .count()
}

fn player(world: &mut World) -> Entity {
    let mut query = world.query_filtered::<Entity, With<Animation>>();
    query.single(world).unwrap()
}

#[derive(Resource, Default)]
struct Hits(Vec<CollisionEvent>);

fn record_hits(trigger: On<CollisionEvent>, mut hits: ResMut<Hits>) {
    hits.0.push(*trigger.event());
}

#[test]
fn menu_switches_to_world_exactly_once() {
    let mut world = build_world(GameConfig::default(), assets());
    start(&mut world, "MenuScene").unwrap();

    assert_eq!(world.resource::<SceneState>().current(), Some("MenuScene"));
    assert_eq!(*world.resource::<Background>(), Background::WHITE);
    let keys = HeldKeys::new();

    // 6 x 0.5s reaches exactly 3s, which is not past the wait.
    for _ in 0..6 {
        assert!(!run_frame(&mut world, 0.5, &keys).unwrap());
    }
    assert_eq!(world.resource::<SceneState>().current(), Some("MenuScene"));

    assert!(run_frame(&mut world, 0.01, &keys).unwrap());
    assert_eq!(world.resource::<SceneState>().current(), Some("WorldScene"));

    for _ in 0..20 {
        assert!(!run_frame(&mut world, 0.5, &keys).unwrap());
    }
    assert_eq!(world.resource::<SceneState>().current(), Some("WorldScene"));
    assert_eq!(world.query::<&SceneSwitcher>().iter(&world).count(), 0);
}

#[test]
fn menu_icon_is_scaled() {
    let mut world = build_world(GameConfig::default(), assets());
    start(&mut world, "MenuScene").unwrap();

    let mut query = world.query::<(&Space, &Renderable, &Group)>();
    let (space, renderable, _) = query
        .iter(&world)
        .find(|(_, _, g)| g.name() == "icon")
        .unwrap();
    assert_eq!(space.width, 128.0);
    assert_eq!(space.height, 128.0);
    assert_eq!(renderable.scale.x, 8.0);

    let commands = draw_list(&mut world);
    assert_eq!(commands.len(), 1);
    assert_eq!(commands[0].tex_key, "icon");
}

#[test]
fn world_on_canvas_centers_player() {
    let mut world = build_world(GameConfig::default(), assets());
    start(&mut world, "WorldScene").unwrap();

    assert_eq!(*world.resource::<WorldBounds>(), WorldBounds::new(500.0, 500.0));
    let player = player(&mut world);
    let space = world.get::<Space>(player).unwrap();
    assert_eq!(space.position.x, (500.0 - 52.0) / 2.0);
    assert_eq!(space.position.y, (500.0 - 72.0) / 2.0);
    assert_eq!(world.get::<Animation>(player).unwrap().current(), "downstop");
    assert_eq!(
        world
            .resource::<SystemRegistry>()
            .entities_of::<ControlSystem>(),
        &[player]
    );
}

#[test]
fn held_key_walks_player_through_full_frame() {
    let mut config = GameConfig::default();
    config.speed_offset = 15.0;
    let mut world = build_world(config, assets());
    start(&mut world, "WorldScene").unwrap();
    let player = player(&mut world);
    let start_y = world.get::<Space>(player).unwrap().position.y;

    let mut keys = HeldKeys::new();
    keys.press(Key::Up);
    run_frame(&mut world, 0.1, &keys).unwrap();

    let space = world.get::<Space>(player).unwrap();
    assert!(approx_eq(space.position.y, start_y - 35.0), "y = {}", space.position.y);
    assert_eq!(world.get::<Animation>(player).unwrap().current(), "up");

    keys.release(Key::Up);
    run_frame(&mut world, 0.1, &keys).unwrap();
    let space = world.get::<Space>(player).unwrap();
    assert!(approx_eq(space.position.y, start_y - 35.0));
    assert_eq!(world.get::<Animation>(player).unwrap().current(), "upstop");
}

#[test]
fn level_terrain_spawns_tiles_and_bounds() {
    let mut config = GameConfig::default();
    config.level = Some("levels/test.json".to_string());
    let mut world = build_world(config, assets());
    world.init_resource::<Hits>();
    world.spawn((Observer::new(record_hits), Persistent));
    world.flush();

    start(&mut world, "WorldScene").unwrap();

    assert_eq!(*world.resource::<WorldBounds>(), WorldBounds::new(320.0, 256.0));
    assert_eq!(count_group(&mut world, "tiles"), 5);
    assert_eq!(count_group(&mut world, "images"), 1);
    let solid = world
        .query::<&Collision>()
        .iter(&world)
        .filter(|c| c.solid)
        .count();
    assert_eq!(solid, 2);

    let player = player(&mut world);
    let space = world.get::<Space>(player).unwrap();
    assert_eq!(space.position.x, (320.0 - 52.0) / 2.0);
    assert_eq!(space.position.y, (256.0 - 72.0) / 2.0);

    // The wall at tile (4, 3) overlaps the centered player.
    run_frame(&mut world, 0.016, &HeldKeys::new()).unwrap();
    let hits = &world.resource::<Hits>().0;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].actor, player);

    let commands = draw_list(&mut world);
    assert_eq!(commands.len(), 7);
    assert!(commands.windows(2).all(|pair| pair[0].z <= pair[1].z));
    assert_eq!(commands.last().unwrap().tex_key, "player");
    assert_eq!(
        world
            .resource::<SystemRegistry>()
            .entities_of::<RenderSystem>()
            .len(),
        7
    );
}

#[test]
fn switch_tears_down_previous_scene() {
    let mut world = build_world(GameConfig::default(), assets());
    start(&mut world, "WorldScene").unwrap();
    assert!(world.contains_resource::<InputBindings>());

    set_scene(&mut world, "MenuScene", false);
    assert!(apply_pending_scene(&mut world).unwrap());

    assert!(!world.contains_resource::<InputBindings>());
    assert!(!world.contains_resource::<WorldBounds>());
    assert_eq!(world.query::<&Animation>().iter(&world).count(), 0);
    assert_eq!(count_group(&mut world, "icon"), 1);
    assert!(
        world
            .resource::<SystemRegistry>()
            .entities_of::<ControlSystem>()
            .is_empty()
    );
    // Cached assets survive a plain switch.
    assert!(world.resource::<AssetStore>().sheet("player").is_some());
}

#[test]
fn force_recreate_drops_cached_assets() {
    let mut world = build_world(GameConfig::default(), assets());
    start(&mut world, "WorldScene").unwrap();

    set_scene(&mut world, "MenuScene", true);
    assert!(apply_pending_scene(&mut world).unwrap());

    let assets = world.resource::<AssetStore>();
    assert!(assets.sheet("player").is_none());
    assert!(assets.sheet("icon").is_some());
}

#[test]
fn no_pending_request_is_noop() {
    let mut world = build_world(GameConfig::default(), assets());
    start(&mut world, "MenuScene").unwrap();
    assert!(!apply_pending_scene(&mut world).unwrap());
    assert_eq!(world.resource::<SceneState>().current(), Some("MenuScene"));
}

#[test]
fn unknown_scene_is_fatal() {
    let mut world = build_world(GameConfig::default(), assets());
    let err = start(&mut world, "DefaultScene").unwrap_err();
    assert!(matches!(err, SceneError::UnknownScene(name) if name == "DefaultScene"));
    assert_eq!(world.resource::<SceneState>().current(), None);
}

#[test]
fn missing_asset_is_fatal_and_leaves_no_scene() {
    let source = InMemoryAssets::new().with_image("hero.png", 208, 288);
    let mut world = build_world(GameConfig::default(), source);

    let err = start(&mut world, "MenuScene").unwrap_err();
    assert!(matches!(err, SceneError::Asset(AssetError::Missing(_))));
    assert_eq!(world.resource::<SceneState>().current(), None);
    assert_eq!(
        world
            .query_filtered::<Entity, Without<Persistent>>()
            .iter(&world)
            .count(),
        0
    );
}

#[test]
fn malformed_level_is_fatal() {
    let mut config = GameConfig::default();
    config.level = Some("levels/broken.json".to_string());
    let source = assets().with_text("levels/broken.json", "{ \"tile_size\": ");
    let mut world = build_world(config, source);

    let err = start(&mut world, "WorldScene").unwrap_err();
    assert!(matches!(err, SceneError::Asset(AssetError::Parse { .. })));
}
