use std::collections::HashMap;

use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::{PrimaryWindow, WindowResized, WindowResolution};

use crate::simulation::scene::Scene;
use crate::visualization::canvas::{CommandBuffer, DrawCommand, Rgba};

/// Z offset between consecutive dots, later points draw on top
const DEPTH_STEP: f32 = 0.001;

/// Pooled circle mesh showing one recorded point
#[derive(Component)]
struct Dot;

/// Draw commands of the current frame
#[derive(Resource, Default)]
struct Frame {
    commands: CommandBuffer,
}

/// Dot entities in drawing order, reused across frames
#[derive(Resource, Default)]
struct DotPool {
    entities: Vec<Entity>,
}

#[derive(Resource)]
struct DotAssets {
    mesh: Mesh2dHandle, // unit-diameter circle, scaled by stroke weight
    materials: HashMap<Rgba, Handle<ColorMaterial>>,
}

impl DotAssets {
    fn material(&mut self, color: Rgba, materials: &mut Assets<ColorMaterial>) -> Handle<ColorMaterial> {
        self.materials
            .entry(color)
            .or_insert_with(|| materials.add(ColorMaterial::from(to_color(color))))
            .clone()
    }
}

fn to_color(color: Rgba) -> Color {
    Color::srgba_u8(color.r, color.g, color.b, color.a)
}

/// Open a window sized to the scene and animate it until closed
pub fn run_2d(scene: Scene) {
    let screen = scene.screen();
    let background = to_color(scene.settings().background_color);

    App::new()
        .insert_resource(ClearColor(background))
        .insert_resource(scene)
        .init_resource::<Frame>()
        .init_resource::<DotPool>()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "heartbeat".into(),
                resolution: WindowResolution::new(screen.width as f32, screen.height as f32),
                ..default()
            }),
            ..default()
        }))
        .add_systems(Startup, setup_system)
        .add_systems(
            Update,
            (resize_system, heartbeat_system, draw_system, present_system).chain(),
        )
        .run();
}

fn setup_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut scene: ResMut<Scene>,
) {
    // 2D camera, world origin at the window center
    commands.spawn(Camera2dBundle::default());

    commands.insert_resource(DotAssets {
        mesh: Mesh2dHandle(meshes.add(Circle::new(0.5))),
        materials: HashMap::new(),
    });

    // the window may not have the requested size
    if let Ok(window) = windows.get_single() {
        scene.handle_resize(window.width() as f64, window.height() as f64);
    }

    info!(
        "run_2d: {} particles, {} repulsors",
        scene.particles().len(),
        scene.repulsors().len()
    );
}

fn resize_system(mut events: EventReader<WindowResized>, mut scene: ResMut<Scene>) {
    if let Some(resized) = events.read().last() {
        scene.handle_resize(resized.width as f64, resized.height as f64);
    }
}

fn heartbeat_system(time: Res<Time>, mut scene: ResMut<Scene>) {
    scene.tick(time.delta());
}

fn draw_system(mut scene: ResMut<Scene>, mut frame: ResMut<Frame>) {
    frame.commands.reset();
    scene.draw(&mut frame.commands);
}

/// Replay the frame's commands onto the dot pool
#[allow(clippy::too_many_arguments)]
fn present_system(
    mut commands: Commands,
    frame: Res<Frame>,
    scene: Res<Scene>,
    mut clear_color: ResMut<ClearColor>,
    mut pool: ResMut<DotPool>,
    mut assets: ResMut<DotAssets>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut dots: Query<(&mut Transform, &mut Handle<ColorMaterial>, &mut Visibility), With<Dot>>,
) {
    let screen = scene.screen();
    let half_width = screen.width as f32 / 2.0;
    let half_height = screen.height as f32 / 2.0;

    let mut weight = 1.0_f32;
    let mut color = Rgba::gray(255);
    let mut used = 0;

    for command in frame.commands.commands() {
        match *command {
            DrawCommand::Clear(background) => clear_color.0 = to_color(background),
            DrawCommand::Stroke { weight: w, color: c } => {
                weight = w as f32;
                color = c;
            }
            DrawCommand::Point(at) => {
                let material = assets.material(color, &mut materials);
                // canvas is y-down from the top-left corner, world is y-up from the center
                let transform = Transform::from_xyz(
                    at.x as f32 - half_width,
                    half_height - at.y as f32,
                    used as f32 * DEPTH_STEP,
                )
                .with_scale(Vec3::splat(weight));

                match pool.entities.get(used).copied() {
                    Some(entity) => {
                        if let Ok((mut dot_transform, mut dot_material, mut visibility)) = dots.get_mut(entity) {
                            *dot_transform = transform;
                            *dot_material = material;
                            *visibility = Visibility::Visible;
                        }
                    }
                    None => {
                        let entity = commands
                            .spawn((
                                MaterialMesh2dBundle {
                                    mesh: assets.mesh.clone(),
                                    material,
                                    transform,
                                    ..default()
                                },
                                Dot,
                            ))
                            .id();
                        pool.entities.push(entity);
                    }
                }
                used += 1;
            }
        }
    }

    for &entity in &pool.entities[used..] {
        if let Ok((_, _, mut visibility)) = dots.get_mut(entity) {
            *visibility = Visibility::Hidden;
        }
    }
}
