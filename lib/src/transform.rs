use geo_types::Coord;
use topojson::TransformParams;

use crate::error::Error;
use crate::error::Result;

/// Decodes TopoJSON positions into coordinates.
///
/// A quantized topology stores arc positions delta-encoded against the
/// previous position of the same arc, then scaled and translated. Without
/// transform parameters positions are used as they are.
#[derive(Clone, Debug)]
pub(crate) struct Transform {
    /// `(scale, translate)`
    params: Option<([f64; 2], [f64; 2])>,
    x0: f64,
    y0: f64,
}

impl Transform {
    pub(crate) fn new(params: Option<&TransformParams>) -> Self {
        Self {
            params: params.map(|tp| (tp.scale, tp.translate)),
            x0: 0_f64,
            y0: 0_f64,
        }
    }

    /// Decode the `i`-th position of an arc.
    ///
    /// `i == 0` restarts delta decoding, which is also how standalone
    /// points are decoded.
    pub(crate) fn apply(&mut self, input: &[f64], i: usize) -> Result<Coord<f64>> {
        if input.len() < 2 {
            return Err(Error::MalformedPosition(input.len()));
        }
        let Some((scale, translate)) = self.params else {
            return Ok(Coord {
                x: input[0],
                y: input[1],
            });
        };

        if i == 0 {
            self.x0 = 0_f64;
            self.y0 = 0_f64;
        }
        self.x0 += input[0];
        self.y0 += input[1];
        Ok(Coord {
            x: self.x0 * scale[0] + translate[0],
            y: self.y0 * scale[1] + translate[1],
        })
    }
}
