//! Per-frame animation: spin the subject, then redraw
use nalgebra::Vector3;

use crate::object::Object3D;
use crate::projection::Camera;
use crate::renderer::Renderer;
use crate::scene::{ObjectId, Scene};

/// Fixed rotation added to the subject on every tick (radians per axis)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub delta: Vector3<f32>,
}

impl Spin {
    pub fn new(delta: Vector3<f32>) -> Self {
        Self { delta }
    }

    /// Spin around X and Y only
    pub fn xy(step: f32) -> Self {
        Self::new(Vector3::new(step, step, 0.0))
    }

    pub fn xyz(step: f32) -> Self {
        Self::new(Vector3::new(step, step, step))
    }
}

/// Everything one demo needs at runtime: the scene, the camera looking at
/// it, and which object spins by how much
#[derive(Debug, Clone)]
pub struct Stage {
    pub scene: Scene,
    pub camera: Camera,
    pub subject: ObjectId,
    pub spin: Spin,
}

impl Stage {
    pub fn subject(&self) -> Option<&Object3D> {
        self.scene.get(self.subject)
    }

    /// Apply one spin step to the subject
    pub fn advance(&mut self) {
        if let Some(object) = self.scene.get_mut(self.subject) {
            object.rotation.rotate_by(&self.spin.delta);
        }
    }
}

/// Host hook that paces the animation loop
pub trait FrameScheduler {
    /// Wait until the next frame is due. Returning `false` ends the loop.
    fn next_frame(&mut self) -> bool;

    /// Stop after `frames` frames
    fn take(self, frames: u64) -> Take<Self>
    where
        Self: Sized,
    {
        Take {
            inner: self,
            remaining: frames,
        }
    }
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    fn next_frame(&mut self) -> bool {
        (**self).next_frame()
    }
}

/// Scheduler adapter returned by [`FrameScheduler::take`]
#[derive(Debug)]
pub struct Take<S> {
    inner: S,
    remaining: u64,
}

impl<S: FrameScheduler> FrameScheduler for Take<S> {
    fn next_frame(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.inner.next_frame()
    }
}

/// Drives a stage through a renderer, one tick per frame
pub struct Animator<R> {
    stage: Stage,
    renderer: R,
    ticks: u64,
}

impl<R: Renderer> Animator<R> {
    pub fn new(stage: Stage, renderer: R) -> Self {
        Self {
            stage,
            renderer,
            ticks: 0,
        }
    }

    /// Rotate the subject, then draw the frame
    pub fn tick(&mut self) -> Result<(), R::Error> {
        self.stage.advance();
        self.renderer.render(&self.stage.scene, &self.stage.camera)?;
        self.ticks += 1;

        if let Some(subject) = self.stage.subject() {
            log::trace!("tick {}: rotation {:?}", self.ticks, subject.rotation);
        }
        Ok(())
    }

    /// Tick once per frame until the scheduler stops. Returns the total
    /// number of ticks so far.
    pub fn run<S: FrameScheduler>(&mut self, mut scheduler: S) -> Result<u64, R::Error> {
        while scheduler.next_frame() {
            self.tick()?;
        }
        log::debug!("animation stopped after {} ticks", self.ticks);
        Ok(self.ticks)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_parts(self) -> (Stage, R) {
        (self.stage, self.renderer)
    }
}
