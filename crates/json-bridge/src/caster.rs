//! pyo3 conversion traits for [`Document`].
//!
//! With these, a `#[pyfunction]` can take or return a `Document` directly:
//! arguments are encoded on the way in and results decoded on the way out.
//! Conversion failures surface as Python exceptions (see
//! `From<ConvertError> for PyErr`).

use pyo3::prelude::*;

use crate::decoder::decode;
use crate::document::Document;
use crate::encoder::encode;

impl<'py> FromPyObject<'py> for Document {
    fn extract_bound(ob: &Bound<'py, PyAny>) -> PyResult<Self> {
        Ok(encode(ob)?)
    }
}

impl<'py> IntoPyObject<'py> for &Document {
    type Target = PyAny;
    type Output = Bound<'py, PyAny>;
    type Error = PyErr;

    fn into_pyobject(self, py: Python<'py>) -> PyResult<Self::Output> {
        Ok(decode(py, self)?)
    }
}

impl<'py> IntoPyObject<'py> for Document {
    type Target = PyAny;
    type Output = Bound<'py, PyAny>;
    type Error = PyErr;

    fn into_pyobject(self, py: Python<'py>) -> PyResult<Self::Output> {
        (&self).into_pyobject(py)
    }
}
