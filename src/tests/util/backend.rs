use std::{cell::{Cell, RefCell}, convert::Infallible, error, fmt, rc::Rc};

use crate::{AreaConstraints, EarcutBackend, PlanarGeometry, Triangulation, TriangulationBackend, TriangulationBehavior, TriangulationOutput};

/// Allocation bookkeeping shared between a [CountingBackend] and the outputs it hands out
#[derive(Debug, Default)]
pub struct Ledger {
    pub allocated: Cell<usize>,
    pub released: Cell<usize>,
    pub refine_calls: Cell<usize>,
    pub behaviors: RefCell<Vec<TriangulationBehavior>>,
    pub constraint_lengths: RefCell<Vec<usize>>,
}

impl Ledger {
    pub fn live(&self) -> usize {
        self.allocated.get() - self.released.get()
    }
}

/// A [Triangulation] which reports its own release to a [Ledger]
#[derive(Debug)]
pub struct Tracked {
    inner: Triangulation,
    ledger: Rc<Ledger>,
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.ledger.released.set(self.ledger.released.get() + 1);
    }
}

impl TriangulationOutput for Tracked {
    fn point_count(&self) -> usize { self.inner.point_count() }
    fn triangle_count(&self) -> usize { self.inner.triangle_count() }
    fn points(&self) -> &[f64] { self.inner.points() }
    fn triangles(&self) -> &[i32] { self.inner.triangles() }
    fn point_markers(&self) -> Option<&[i32]> { self.inner.point_markers() }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InjectedFailure;

impl fmt::Display for InjectedFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InjectedFailure")
    }
}

impl error::Error for InjectedFailure { }

/// Wraps an [EarcutBackend], counting every output it allocates and releases
#[derive(Debug, Default)]
pub struct CountingBackend {
    pub ledger: Rc<Ledger>,
    pub fail_refine: bool,
}

impl CountingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_refine() -> Self {
        Self { fail_refine: true, ..Self::default() }
    }

    fn track(&self, inner: Triangulation) -> Tracked {
        self.ledger.allocated.set(self.ledger.allocated.get() + 1);
        Tracked { inner, ledger: self.ledger.clone() }
    }
}

impl TriangulationBackend for CountingBackend {
    type Output = Tracked;
    type Error = InjectedFailure;

    fn triangulate(&self, geometry: PlanarGeometry<'_>, behavior: &TriangulationBehavior) -> Result<Tracked, InjectedFailure> {
        self.ledger.behaviors.borrow_mut().push(*behavior);
        let inner = EarcutBackend::new().triangulate(geometry, behavior).map_err(|_| InjectedFailure)?;
        Ok(self.track(inner))
    }

    fn refine(&self, prior: &Tracked, constraints: &AreaConstraints, behavior: &TriangulationBehavior) -> Result<Tracked, InjectedFailure> {
        self.ledger.refine_calls.set(self.ledger.refine_calls.get() + 1);
        self.ledger.behaviors.borrow_mut().push(*behavior);
        self.ledger.constraint_lengths.borrow_mut().push(constraints.len());
        if self.fail_refine {
            return Err(InjectedFailure);
        }
        let inner = EarcutBackend::new().refine(&prior.inner, constraints, behavior).map_err(|_| InjectedFailure)?;
        Ok(self.track(inner))
    }
}

/// Output whose declared counts are independent of its buffers
#[derive(Debug, Clone, Default)]
pub struct RawOutput {
    pub point_count: usize,
    pub triangle_count: usize,
    pub corners: usize,
    pub points: Vec<f64>,
    pub triangles: Vec<i32>,
    pub markers: Option<Vec<i32>>,
}

impl TriangulationOutput for RawOutput {
    fn point_count(&self) -> usize { self.point_count }
    fn triangle_count(&self) -> usize { self.triangle_count }
    fn corners(&self) -> usize { self.corners }
    fn points(&self) -> &[f64] { &self.points }
    fn triangles(&self) -> &[i32] { &self.triangles }
    fn point_markers(&self) -> Option<&[i32]> { self.markers.as_deref() }
}

/// Returns the same [RawOutput] from both passes, whatever it is asked
#[derive(Debug, Clone)]
pub struct ScriptedBackend {
    pub output: RawOutput,
}

impl ScriptedBackend {
    /// Two counterclockwise triangles over a unit square, no markers
    pub fn unit_square() -> Self {
        Self {
            output: RawOutput {
                point_count: 4,
                triangle_count: 2,
                corners: 3,
                points: vec![0., 0., 1., 0., 1., 1., 0., 1.],
                triangles: vec![0, 1, 2, 0, 2, 3],
                markers: None,
            },
        }
    }
}

impl TriangulationBackend for ScriptedBackend {
    type Output = RawOutput;
    type Error = Infallible;

    fn triangulate(&self, _geometry: PlanarGeometry<'_>, _behavior: &TriangulationBehavior) -> Result<RawOutput, Infallible> {
        Ok(self.output.clone())
    }

    fn refine(&self, _prior: &RawOutput, _constraints: &AreaConstraints, _behavior: &TriangulationBehavior) -> Result<RawOutput, Infallible> {
        Ok(self.output.clone())
    }
}
