/// Camera and projection matrix builders
use crate::error::{MathError, MathResult};
use crate::matrix::Mat4;
use crate::transform::radians;
use crate::vector::{Vec3, Vec4};

/// Build a view matrix looking from `eye` towards `at`.
///
/// When `eye == at` there is no viewing direction and the identity is
/// returned instead of a NaN-filled matrix.
pub fn look_at(eye: &Vec3, at: &Vec3, up: &Vec3) -> MathResult<Mat4> {
    if eye == at {
        log::debug!("look_at: eye equals target at {}, using identity view", eye);
        return Ok(Mat4::identity());
    }

    let forward = (*at - *eye).normalize(false)?;
    let right = forward
        .cross(up)
        .normalize(false)
        .map_err(|_| MathError::degenerate("look_at: up is parallel to the view direction"))?;
    let true_up = right.cross(&forward).normalize(false)?;
    let back = -forward;

    Ok(Mat4::from_rows([
        [right.x(), right.y(), right.z(), -right.dot(eye)],
        [true_up.x(), true_up.y(), true_up.z(), -true_up.dot(eye)],
        [back.x(), back.y(), back.z(), -back.dot(eye)],
        [0.0, 0.0, 0.0, 1.0],
    ]))
}

/// Orthographic projection of the box `[left, right] x [bottom, top] x [-near, -far]`
pub fn ortho(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> MathResult<Mat4> {
    if ![left, right, bottom, top, near, far].iter().all(|v| v.is_finite()) {
        return Err(MathError::degenerate("ortho: planes must be finite"));
    }
    if left == right {
        return Err(MathError::degenerate("ortho: left and right are equal"));
    }
    if bottom == top {
        return Err(MathError::degenerate("ortho: bottom and top are equal"));
    }
    if near == far {
        return Err(MathError::degenerate("ortho: near and far are equal"));
    }

    let w = right - left;
    let h = top - bottom;
    let d = far - near;

    Ok(Mat4::from_rows([
        [2.0 / w, 0.0, 0.0, -(left + right) / w],
        [0.0, 2.0 / h, 0.0, -(top + bottom) / h],
        // near/far are distances along -z, hence the negated z scale
        [0.0, 0.0, -2.0 / d, -(near + far) / d],
        [0.0, 0.0, 0.0, 1.0],
    ]))
}

/// Symmetric OpenGL-style perspective projection. `fovy` is in degrees.
pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> MathResult<Mat4> {
    if ![fovy, aspect, near, far].iter().all(|v| v.is_finite()) {
        return Err(MathError::degenerate("perspective: arguments must be finite"));
    }
    if near == far {
        return Err(MathError::degenerate("perspective: near and far are equal"));
    }
    if aspect == 0.0 {
        return Err(MathError::degenerate("perspective: aspect ratio is zero"));
    }
    let t = (radians(fovy) / 2.0).tan();
    if t == 0.0 {
        return Err(MathError::degenerate("perspective: field of view is zero"));
    }

    let f = 1.0 / t;
    let d = far - near;

    Ok(Mat4::from_rows([
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [0.0, 0.0, -(near + far) / d, -2.0 * near * far / d],
        [0.0, 0.0, -1.0, 0.0],
    ]))
}

/// Projection mode for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionMode {
    Orthographic,
    Perspective,
}

/// Camera configuration for 3D rendering
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub at: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fovy: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub mode: ProjectionMode,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            eye: Vec3::from_xyz(0.0, 0.0, 8.0),
            at: Vec3::zero(),
            up: Vec3::from_xyz(0.0, 1.0, 0.0),
            fovy: 45.0,
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 100.0,
            mode: ProjectionMode::Perspective,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> MathResult<Mat4> {
        look_at(&self.eye, &self.at, &self.up)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> MathResult<Mat4> {
        match self.mode {
            ProjectionMode::Perspective => perspective(self.fovy, self.aspect, self.near, self.far),
            ProjectionMode::Orthographic => {
                let height = (self.eye - self.at).length();
                let width = height * self.aspect;
                ortho(
                    -width / 2.0,
                    width / 2.0,
                    -height / 2.0,
                    height / 2.0,
                    self.near,
                    self.far,
                )
            }
        }
    }

    pub fn view_projection(&self) -> MathResult<Mat4> {
        Ok(self.projection_matrix()? * self.view_matrix()?)
    }

    /// Project a model-space point to screen space.
    ///
    /// Returns `(x, y, depth)` with `y` growing downwards, or `None` when the
    /// point falls outside the clip volume.
    pub fn project_to_screen(
        &self,
        point: &Vec3,
        model_matrix: &Mat4,
        width: u32,
        height: u32,
    ) -> MathResult<Option<(f32, f32, f32)>> {
        let mvp = self.view_projection()? * *model_matrix;
        let clip = mvp * Vec4::from_vec3(point);

        // Prevent division by near-zero w
        if clip.w().abs() < 1e-6 {
            return Ok(None);
        }

        let ndc_x = clip.x() / clip.w();
        let ndc_y = clip.y() / clip.w();
        let depth = clip.z() / clip.w();

        // Clip test
        if !(-1.0..=1.0).contains(&ndc_x) || !(-1.0..=1.0).contains(&ndc_y) || !(-1.0..=1.0).contains(&depth) {
            return Ok(None);
        }

        let screen_x = (ndc_x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc_y) * 0.5 * height as f32;

        Ok(Some((screen_x, screen_y, depth)))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector::EPSILON;

    #[test]
    fn test_camera_creation() {
        let camera = Camera::new(800, 600);
        assert_eq!(camera.mode, ProjectionMode::Perspective);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert_eq!(Camera::default(), camera);
    }

    #[test]
    fn test_view_matrix() {
        let camera = Camera::new(800, 600);
        let view = camera.view_matrix().unwrap();
        // Camera on +z looking at the origin only translates the world
        assert!(view.approx_eq(&crate::Transform::translate(0.0, 0.0, -8.0), EPSILON));
    }

    #[test]
    fn test_look_at_degenerate_is_identity() {
        let eyes = [Vec3::zero(), Vec3::from_xyz(1.0, -2.0, 3.5)];
        let ups = [Vec3::from_xyz(0.0, 1.0, 0.0), Vec3::zero()];
        for eye in eyes {
            for up in ups {
                assert_eq!(look_at(&eye, &eye, &up).unwrap(), Mat4::identity());
            }
        }
    }

    #[test]
    fn test_look_at_maps_eye_to_origin() {
        let eye = Vec3::from_xyz(3.0, 4.0, 5.0);
        let at = Vec3::from_xyz(0.0, 1.0, 0.0);
        let view = look_at(&eye, &at, &Vec3::from_xyz(0.0, 1.0, 0.0)).unwrap();

        let origin = view * Vec4::from_vec3(&eye);
        assert!(origin.approx_eq(&Vec4::point(0.0, 0.0, 0.0), 1e-5));

        // The target lies straight down the -z axis
        let target = view * Vec4::from_vec3(&at);
        let distance = (at - eye).length();
        assert!(target.approx_eq(&Vec4::point(0.0, 0.0, -distance), 1e-5));
    }

    #[test]
    fn test_look_at_nearby_target() {
        let eye = Vec3::from_xyz(0.0, 0.0, 1e-22);
        let view = look_at(&eye, &Vec3::zero(), &Vec3::from_xyz(0.0, 1.0, 0.0)).unwrap();
        assert!(view.approx_eq(&Mat4::identity(), EPSILON));
    }

    #[test]
    fn test_look_at_parallel_up() {
        let err = look_at(
            &Vec3::zero(),
            &Vec3::from_xyz(0.0, 5.0, 0.0),
            &Vec3::from_xyz(0.0, 1.0, 0.0),
        )
        .unwrap_err();
        assert!(matches!(err, MathError::DegenerateInput(_)));
    }

    #[test]
    fn test_ortho_unit_cube() {
        // Near/far are distances along -z, so the symmetric cube flips z
        let m = ortho(-1.0, 1.0, -1.0, 1.0, -1.0, 1.0).unwrap();
        let expected = Mat4::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, -1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        assert_eq!(m, expected);

        let m = ortho(-1.0, 1.0, -1.0, 1.0, 1.0, -1.0).unwrap();
        assert_eq!(m, Mat4::identity());
    }

    #[test]
    fn test_ortho_degenerate_planes() {
        for args in [
            (1.0, 1.0, -1.0, 1.0, 0.1, 10.0),
            (-1.0, 1.0, 2.0, 2.0, 0.1, 10.0),
            (-1.0, 1.0, -1.0, 1.0, 3.0, 3.0),
        ] {
            let err = ortho(args.0, args.1, args.2, args.3, args.4, args.5).unwrap_err();
            assert!(matches!(err, MathError::DegenerateInput(_)));
        }
    }

    #[test]
    fn test_perspective_ninety_degrees() {
        let m = perspective(90.0, 1.0, 1.0, 100.0).unwrap();
        assert!((m[(0, 0)] - 1.0).abs() < EPSILON);
        assert!((m[(1, 1)] - 1.0).abs() < EPSILON);
        assert_eq!(m[(3, 2)], -1.0);
        assert_eq!(m[(3, 3)], 0.0);

        // Near plane maps to -1, far plane to +1
        let near = m * Vec4::point(0.0, 0.0, -1.0);
        let far = m * Vec4::point(0.0, 0.0, -100.0);
        assert!((near.z() / near.w() + 1.0).abs() < 1e-5);
        assert!((far.z() / far.w() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_perspective_degenerate() {
        assert!(perspective(45.0, 1.0, 5.0, 5.0).is_err());
        assert!(perspective(45.0, 0.0, 0.1, 100.0).is_err());
        assert!(perspective(0.0, 1.0, 0.1, 100.0).is_err());
    }

    #[test]
    fn test_projection_rejects_non_finite() {
        let err = perspective(45.0, f32::INFINITY, 0.1, 100.0).unwrap_err();
        assert!(matches!(err, MathError::DegenerateInput(_)));
        assert!(perspective(f32::NAN, 1.0, 0.1, 100.0).is_err());
        assert!(ortho(-1.0, f32::INFINITY, -1.0, 1.0, 0.1, 10.0).is_err());

        // A zero-height viewport has no aspect ratio
        let camera = Camera::new(800, 0);
        assert!(matches!(camera.projection_matrix(), Err(MathError::DegenerateInput(_))));
    }

    #[test]
    fn test_orthographic_camera_extent() {
        let mut camera = Camera::new(200, 100);
        camera.mode = ProjectionMode::Orthographic;
        let m = camera.projection_matrix().unwrap();
        // Distance 8 gives a 16 x 8 view volume
        assert!((m[(0, 0)] - 2.0 / 16.0).abs() < EPSILON);
        assert!((m[(1, 1)] - 2.0 / 8.0).abs() < EPSILON);

        camera.at = camera.eye;
        assert!(camera.projection_matrix().is_err());
    }

    #[test]
    fn test_project_to_screen() {
        let camera = Camera::new(800, 600);
        let model = Mat4::identity();

        let (x, y, depth) = camera
            .project_to_screen(&Vec3::zero(), &model, 800, 600)
            .unwrap()
            .unwrap();
        assert!((x - 400.0).abs() < 1e-3);
        assert!((y - 300.0).abs() < 1e-3);
        assert!(depth > -1.0 && depth < 1.0);

        // Behind the camera
        let behind = camera
            .project_to_screen(&Vec3::from_xyz(0.0, 0.0, 20.0), &model, 800, 600)
            .unwrap();
        assert!(behind.is_none());
    }
}
