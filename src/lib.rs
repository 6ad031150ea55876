//! Point-particle core for off-lattice self-propelled particle (Vicsek-type)
//! simulations on a square periodic domain.

pub mod core;
pub mod error;

pub use crate::core::{Particle, Space};
pub use crate::error::{Error, Result};

#[cfg(feature = "python")]
mod python {
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::core::{Particle, Space};

    fn py_err<E: ToString>(e: E) -> PyErr {
        PyValueError::new_err(e.to_string())
    }

    /// Python-facing wrapper around the Rust [`Particle`].
    ///
    /// API:
    /// - Particle(x, y, speed_module, speed_angle)
    /// - properties x, y, speed_module, speed_angle (read/write)
    /// - distance_to(other) -> float
    /// - periodic_distance_to(other, limit) -> float
    /// - move(limit)
    #[pyclass(name = "Particle", module = "off_lattice")]
    #[derive(Clone)]
    pub struct PyParticle {
        inner: Particle,
    }

    #[pymethods]
    impl PyParticle {
        /// Create a particle. Values are stored as given, without validation.
        #[new]
        #[pyo3(signature = (x, y, speed_module, speed_angle))]
        fn new(x: f64, y: f64, speed_module: f64, speed_angle: f64) -> Self {
            Self {
                inner: Particle::new(x, y, speed_module, speed_angle),
            }
        }

        #[getter]
        fn x(&self) -> f64 {
            self.inner.x()
        }

        #[setter]
        fn set_x(&mut self, x: f64) {
            self.inner.set_x(x);
        }

        #[getter]
        fn y(&self) -> f64 {
            self.inner.y()
        }

        #[setter]
        fn set_y(&mut self, y: f64) {
            self.inner.set_y(y);
        }

        #[getter]
        fn speed_module(&self) -> f64 {
            self.inner.speed()
        }

        #[setter]
        fn set_speed_module(&mut self, speed: f64) {
            self.inner.set_speed(speed);
        }

        #[getter]
        fn speed_angle(&self) -> f64 {
            self.inner.angle()
        }

        #[setter]
        fn set_speed_angle(&mut self, angle: f64) {
            self.inner.set_angle(angle);
        }

        /// Euclidean distance to `other`, ignoring the periodic domain.
        ///
        /// Errors: raises ValueError if `other` is None.
        #[pyo3(signature = (other))]
        fn distance_to(&self, other: Option<PyRef<'_, Self>>) -> PyResult<f64> {
            self.inner
                .try_distance_to(other.as_deref().map(|p| &p.inner))
                .map_err(py_err)
        }

        /// Minimum-image distance to `other` on a domain of side `limit`.
        fn periodic_distance_to(&self, other: PyRef<'_, Self>, limit: f64) -> PyResult<f64> {
            let space = Space::new(limit).map_err(py_err)?;
            Ok(self.inner.periodic_distance_to(&other.inner, &space))
        }

        /// Advance one time step on a periodic domain of side `limit`.
        ///
        /// Errors: raises ValueError if `limit` is not a finite positive number.
        #[pyo3(name = "move")]
        fn step(&mut self, limit: f64) -> PyResult<()> {
            self.inner.try_step(limit).map_err(py_err)
        }

        fn __repr__(&self) -> String {
            format!(
                "Particle(x={}, y={}, speed_module={}, speed_angle={})",
                self.inner.x(),
                self.inner.y(),
                self.inner.speed(),
                self.inner.angle()
            )
        }
    }

    /// The off_lattice Python module entry point.
    #[pymodule]
    fn off_lattice(_py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_class::<PyParticle>()?;
        Ok(())
    }
}
