//! Perspective camera and damped orbit controls.

use std::f64::consts::FRAC_PI_2;

use super::math::Vec3;

pub const FOV_DEG: f64 = 75.0;
pub const NEAR: f64 = 0.1;
pub const FAR: f64 = 1000.0;
pub const HOME_POSITION: Vec3 = Vec3::new(0.0, 2.0, 5.0);

pub const DAMPING: f64 = 0.05;
pub const MIN_DISTANCE: f64 = 2.0;
pub const MAX_DISTANCE: f64 = 10.0;
pub const MAX_POLAR: f64 = FRAC_PI_2;
const MIN_POLAR: f64 = 1e-6;

// Per key press
const ORBIT_STEP: f64 = 0.6;
const ZOOM_STEP: f64 = 0.9;

/// Viewport size in square drawing units (braille dots).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f64 {
        if self.height <= 0.0 {
            1.0
        } else {
            self.width / self.height
        }
    }
}

#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub aspect: f64,
    fov_y: f64,
}

/// A point in camera space: normalized device x/y plus positive depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub depth: f64,
}

impl Camera {
    pub fn new(aspect: f64) -> Self {
        Self {
            position: HOME_POSITION,
            target: Vec3::ZERO,
            aspect,
            fov_y: FOV_DEG.to_radians(),
        }
    }

    /// Keep the projection in sync with the current viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    fn basis(&self) -> (Vec3, Vec3, Vec3) {
        let forward = (self.target - self.position).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        (forward, right, up)
    }

    /// Distance in front of the camera along the view direction.
    pub fn depth(&self, p: Vec3) -> f64 {
        (p - self.position).dot(self.basis().0)
    }

    /// Project a world point; `None` when outside the near/far range.
    pub fn project(&self, p: Vec3) -> Option<Projected> {
        let depth = self.depth(p);
        if !(NEAR..=FAR).contains(&depth) {
            return None;
        }
        Some(self.to_ndc(p))
    }

    /// Project a segment, clipping it against the near plane.
    pub fn project_segment(&self, a: Vec3, b: Vec3) -> Option<(Projected, Projected)> {
        let (da, db) = (self.depth(a), self.depth(b));
        if (da < NEAR && db < NEAR) || (da > FAR && db > FAR) {
            return None;
        }
        let clip = |inside: Vec3, d_in: f64, outside: Vec3, d_out: f64| {
            inside + (outside - inside) * ((NEAR - d_in) / (d_out - d_in))
        };
        let (a, b) = if da < NEAR {
            (clip(b, db, a, da), b)
        } else if db < NEAR {
            (a, clip(a, da, b, db))
        } else {
            (a, b)
        };
        Some((self.to_ndc(a), self.to_ndc(b)))
    }

    fn to_ndc(&self, p: Vec3) -> Projected {
        let (forward, right, up) = self.basis();
        let v = p - self.position;
        let depth = v.dot(forward).max(NEAR);
        let half_h = (self.fov_y / 2.0).tan() * depth;
        let half_w = half_h * self.aspect;
        Projected {
            x: v.dot(right) / half_w,
            y: v.dot(up) / half_h,
            depth,
        }
    }
}

// Spherical coordinates around the target: radius, polar angle from +y (phi),
// azimuth around y measured from +z (theta).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f64,
    phi: f64,
    theta: f64,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self { radius, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
            theta: v.x.atan2(v.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let s = self.phi.sin() * self.radius;
        Vec3::new(s * self.theta.sin(), self.phi.cos() * self.radius, s * self.theta.cos())
    }
}

/// Orbit controls: input accumulates a rotation delta that is bled into the
/// camera a fraction per frame, so motion eases out.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    delta_theta: f64,
    delta_phi: f64,
    zoom: f64,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            delta_theta: 0.0,
            delta_phi: 0.0,
            zoom: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn rotate_left(&mut self) {
        self.delta_theta -= ORBIT_STEP;
    }

    pub fn rotate_right(&mut self) {
        self.delta_theta += ORBIT_STEP;
    }

    pub fn rotate_up(&mut self) {
        self.delta_phi -= ORBIT_STEP;
    }

    pub fn rotate_down(&mut self) {
        self.delta_phi += ORBIT_STEP;
    }

    pub fn zoom_in(&mut self) {
        self.zoom *= ZOOM_STEP;
    }

    pub fn zoom_out(&mut self) {
        self.zoom /= ZOOM_STEP;
    }

    /// Advance one frame of damping and write the result into `camera`.
    pub fn update(&mut self, camera: &mut Camera) {
        let mut s = Spherical::from_offset(camera.position - camera.target);
        s.theta += self.delta_theta * DAMPING;
        s.phi = (s.phi + self.delta_phi * DAMPING).clamp(MIN_POLAR, MAX_POLAR);
        s.radius = (s.radius * self.zoom).clamp(MIN_DISTANCE, MAX_DISTANCE);
        camera.position = camera.target + s.to_offset();

        self.delta_theta *= 1.0 - DAMPING;
        self.delta_phi *= 1.0 - DAMPING;
        self.zoom = 1.0;
    }

    pub fn reset(&mut self, camera: &mut Camera) {
        *self = Self::default();
        camera.position = HOME_POSITION;
        camera.target = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_projects_to_center() {
        let cam = Camera::new(1.5);
        let p = cam.project(Vec3::ZERO).unwrap();
        assert!(p.x.abs() < 1e-9 && p.y.abs() < 1e-9);
        assert!((p.depth - HOME_POSITION.length()).abs() < 1e-9);
        assert!(cam.project(HOME_POSITION + Vec3::new(0.0, 0.0, 1.0)).is_none());
    }

    #[test]
    fn segments_crossing_the_camera_plane_are_clipped() {
        let cam = Camera::new(1.0);
        let (a, b) = cam
            .project_segment(Vec3::new(1.0, 0.0, -10.0), Vec3::new(1.0, 0.0, 10.0))
            .expect("partly visible");
        assert!(a.depth > NEAR && (b.depth - NEAR).abs() < 1e-9);
        assert!(cam
            .project_segment(Vec3::new(0.0, 0.0, 8.0), Vec3::new(1.0, 0.0, 9.0))
            .is_none());
    }

    #[test]
    fn aspect_follows_viewport() {
        let mut cam = Camera::new(1.0);
        cam.set_viewport(Viewport::new(240.0, 80.0));
        assert_eq!(cam.aspect, 3.0);
        cam.set_viewport(Viewport::new(100.0, 0.0));
        assert_eq!(cam.aspect, 1.0);
    }

    #[test]
    fn damping_eases_and_clamps() {
        let mut cam = Camera::new(1.0);
        let mut controls = OrbitControls::default();
        controls.rotate_right();
        controls.update(&mut cam);
        let first = cam.position;
        controls.update(&mut cam);
        assert_ne!(first, cam.position, "rotation should keep easing");

        for _ in 0..50 {
            controls.zoom_in();
            controls.rotate_down();
            controls.update(&mut cam);
        }
        let offset = cam.position - cam.target;
        assert!(offset.length() >= MIN_DISTANCE - 1e-9);
        assert!(offset.y >= -1e-9, "camera went below the floor plane");

        controls.reset(&mut cam);
        assert_eq!(cam.position, HOME_POSITION);
    }
}
