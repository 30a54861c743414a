use nalgebra::Point3;
use spin3d_core::{
    Animator, Camera, Demo, FrameScheduler, Primitive, Renderer, Rotation, Scene, Viewport,
};

/// Keeps a copy of every frame's subject rotation and object count
#[derive(Default)]
struct FrameLog {
    viewport: Option<Viewport>,
    frames: Vec<(usize, Rotation)>,
}

impl Renderer for FrameLog {
    type Error = std::convert::Infallible;

    fn set_size(&mut self, viewport: Viewport) {
        self.viewport = Some(viewport);
    }

    fn viewport(&self) -> Viewport {
        self.viewport.expect("renderer was never sized")
    }

    fn render(&mut self, scene: &Scene, _camera: &Camera) -> Result<(), Self::Error> {
        let rotation = scene
            .iter()
            .next()
            .map(|(_, o)| o.rotation)
            .unwrap_or_default();
        self.frames.push((scene.len(), rotation));
        Ok(())
    }
}

struct Refresh;

impl FrameScheduler for Refresh {
    fn next_frame(&mut self) -> bool {
        true
    }
}

fn animator(demo: Demo) -> Animator<FrameLog> {
    let viewport = Viewport::new(1024, 768).unwrap();
    let mut renderer = FrameLog::default();
    renderer.set_size(viewport);
    Animator::new(demo.stage(viewport).unwrap(), renderer)
}

#[test]
fn box_spins_on_x_and_y() {
    let mut animator = animator(Demo::Box);
    assert_eq!(animator.stage().camera.position.z, 5.0);

    animator.run(Refresh.take(100)).unwrap();

    let rotation = animator.stage().subject().unwrap().rotation;
    assert!((rotation.x - 1.0).abs() < 1e-4, "x = {}", rotation.x);
    assert!((rotation.y - 1.0).abs() < 1e-4, "y = {}", rotation.y);
    assert_eq!(rotation.z, 0.0);
    assert_eq!(animator.renderer().frames.len(), 100);
}

#[test]
fn line_spins_on_all_axes() {
    let mut animator = animator(Demo::Line);
    let camera = &animator.stage().camera;
    assert_eq!(camera.position, Point3::new(0.0, 0.0, 20.0));
    let to_target = (Point3::new(0.0, 1.0, 0.0) - camera.position).normalize();
    assert!((camera.forward() - to_target).norm() < 1e-5);

    match &animator.stage().subject().unwrap().primitive {
        Primitive::Line { geometry, material } => {
            assert_eq!(geometry.points.len(), 4);
            assert_eq!(material.color.to_string(), "#0000ff");
        }
        other => panic!("expected a line, got {:?}", other),
    }

    animator.run(Refresh.take(50)).unwrap();

    let rotation = animator.stage().subject().unwrap().rotation;
    for angle in [rotation.x, rotation.y, rotation.z] {
        assert!((angle - 0.5).abs() < 1e-4, "angle = {}", angle);
    }
}

#[test]
fn rotation_grows_linearly_with_ticks() {
    let mut animator = animator(Demo::Box);
    animator.run(Refresh.take(250)).unwrap();

    for (n, (_, rotation)) in animator.renderer().frames.iter().enumerate() {
        let expected = (n + 1) as f32 * 0.01;
        assert!((rotation.x - expected).abs() < 1e-4);
        assert!((rotation.y - expected).abs() < 1e-4);
    }
}

#[test]
fn scene_keeps_exactly_one_object() {
    for demo in Demo::ALL {
        let mut animator = animator(demo);
        assert_eq!(animator.stage().scene.len(), 1);
        animator.run(Refresh.take(20)).unwrap();
        assert!(animator.renderer().frames.iter().all(|(count, _)| *count == 1));
        assert_eq!(animator.stage().scene.len(), 1);
    }
}

#[test]
fn aspect_is_fixed_at_construction() {
    let mut animator = animator(Demo::Box);
    animator.run(Refresh.take(1)).unwrap();

    animator
        .renderer_mut()
        .set_size(Viewport::new(300, 900).unwrap());
    animator.run(Refresh.take(1)).unwrap();

    assert!((animator.stage().camera.aspect - 1024.0 / 768.0).abs() < 1e-6);
}

#[test]
fn rendering_does_not_change_the_scene() {
    let (stage, mut renderer) = animator(Demo::Line).into_parts();
    renderer.render(&stage.scene, &stage.camera).unwrap();
    renderer.render(&stage.scene, &stage.camera).unwrap();
    assert_eq!(renderer.frames[0], renderer.frames[1]);
    assert_eq!(renderer.frames[0].1, Rotation::zero());
}

#[test]
fn degenerate_viewport_is_rejected() {
    assert!(Viewport::new(0, 600).is_err());
}
