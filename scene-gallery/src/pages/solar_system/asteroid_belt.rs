use std::f32::consts::TAU;

use bevy::prelude::*;
use constants::planets::ASTEROID_BELT_RADII;
use rand::Rng;

use super::PAGE;

const ASTEROID_RADIUS: f32 = 0.07;
/// Total thickness of the belt above and below the orbit plane.
const BELT_THICKNESS: f32 = 0.5;

#[derive(Component)]
pub struct Asteroid;

/// Randomly placed and oriented rocks between the inner and outer belt radius.
pub fn asteroid_transforms(rng: &mut impl Rng, count: usize) -> Vec<Transform> {
    let (inner, outer) = ASTEROID_BELT_RADII;
    (0..count)
        .map(|_| {
            let angle = rng.random::<f32>() * TAU;
            let radius = inner + rng.random::<f32>() * (outer - inner);
            let height = (rng.random::<f32>() - 0.5) * BELT_THICKNESS;
            let rotation = Quat::from_euler(
                EulerRot::XYZ,
                rng.random::<f32>() * TAU,
                rng.random::<f32>() * TAU,
                rng.random::<f32>() * TAU,
            );
            Transform::from_xyz(angle.cos() * radius, height, angle.sin() * radius)
                .with_rotation(rotation)
        })
        .collect()
}

pub fn spawn_asteroid_belt(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    rng: &mut impl Rng,
    count: usize,
) {
    let mesh = meshes.add(Sphere::new(ASTEROID_RADIUS).mesh().uv(8, 8));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x88, 0x88, 0x88),
        ..default()
    });

    let rocks: Vec<_> = asteroid_transforms(rng, count)
        .into_iter()
        .map(|transform| {
            (
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                transform,
                Asteroid,
                StateScoped(PAGE),
            )
        })
        .collect();
    commands.spawn_batch(rocks);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn rocks_stay_inside_the_belt() {
        let (inner, outer) = ASTEROID_BELT_RADII;
        let mut rng = StdRng::seed_from_u64(3);
        let rocks = asteroid_transforms(&mut rng, 1000);

        assert_eq!(rocks.len(), 1000);
        for rock in rocks {
            let p = rock.translation;
            let radius = Vec2::new(p.x, p.z).length();
            assert!(radius >= inner - 1e-4 && radius <= outer + 1e-4);
            assert!(p.y.abs() <= BELT_THICKNESS / 2.0);
        }
    }
}
