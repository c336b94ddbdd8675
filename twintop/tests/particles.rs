//! Particle cloud motion under varying CPU load.

use rand::{rngs::StdRng, SeedableRng};
use twintop::palette;
use twintop::particles::{rise, ParticleCloud, CEILING, PARTICLE_COUNT, SPREAD};

fn assert_in_bounds(cloud: &ParticleCloud) {
    for p in cloud.particles() {
        assert!(
            (0.0..CEILING).contains(&p.position.y),
            "y out of range: {}",
            p.position.y
        );
        assert!(p.position.x.abs() <= SPREAD && p.position.z.abs() <= SPREAD);
    }
}

#[test]
fn heights_stay_below_ceiling() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut cloud = ParticleCloud::new(&mut rng);
    assert_eq!(cloud.particles().len(), PARTICLE_COUNT);
    assert_in_bounds(&cloud);

    for frame in 0..2_000 {
        let cpu = (frame % 101) as f64;
        cloud.step(cpu, &mut rng);
        assert_in_bounds(&cloud);
    }
}

#[test]
fn rise_speed_follows_load() {
    assert_eq!(rise(0.0), 0.01);
    assert_eq!(rise(100.0), 0.02);
    assert!(rise(70.0) > rise(20.0));
}

#[test]
fn color_follows_load_band() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut cloud = ParticleCloud::new(&mut rng);
    cloud.step(10.0, &mut rng);
    assert!(cloud.particles().iter().all(|p| p.color == palette::PARTICLE_CYAN));
    cloud.step(65.0, &mut rng);
    assert!(cloud.particles().iter().all(|p| p.color == palette::PARTICLE_ORANGE));
    cloud.step(95.0, &mut rng);
    assert!(cloud.particles().iter().all(|p| p.color == palette::PARTICLE_RED));
}
