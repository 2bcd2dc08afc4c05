//! Textual circuit descriptions.
//!
//! A road path names the starting lane end followed by the lanes to enter:
//! `"start:a,b,c"` begins at the start of `a`, `"end:a,b"` at the finish of
//! `a` (so `a` is driven backwards). An empty string asks for the network's
//! default start and an auto-detected cycle.

use std::fmt;

use road_api::{LaneEnd, LaneId, RoadGeometry, Which};

use crate::circuit_error::CircuitError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoadPath {
    /// `None` selects [`default_start`].
    pub start: Option<LaneEnd>,
    pub path: Vec<LaneId>,
}

impl RoadPath {
    pub fn parse(text: &str) -> Result<Self, CircuitError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Self::default());
        }

        let (end, lanes) = text.split_once(':').ok_or_else(|| {
            CircuitError::PathSyntax("road path must start with 'start:' or 'end:'".to_string())
        })?;
        let end = match end.trim() {
            "start" => Which::Start,
            "end" => Which::Finish,
            other => {
                return Err(CircuitError::PathSyntax(format!(
                    "road path must start with 'start:' or 'end:', got '{other}:'"
                )))
            }
        };

        let mut ids = lanes.split(',').map(str::trim);
        let first = ids.next().unwrap_or_default();
        if first.is_empty() {
            return Err(CircuitError::PathSyntax(
                "road path names no starting lane".to_string(),
            ));
        }
        let path = ids
            .map(|id| {
                if id.is_empty() {
                    Err(CircuitError::PathSyntax(format!("empty lane id in '{text}'")))
                } else {
                    Ok(LaneId::new(id))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            start: Some(LaneEnd::new(first, end)),
            path,
        })
    }

    /// Checks every named lane exists in `source` and fills in the default
    /// start if none was named.
    pub fn resolve(
        &self,
        source: &dyn RoadGeometry,
    ) -> Result<(LaneEnd, Vec<LaneId>), CircuitError> {
        let start = match &self.start {
            Some(start) => start.clone(),
            None => default_start(source)?,
        };
        for id in std::iter::once(&start.lane).chain(self.path.iter()) {
            source.lane_or_err(id)?;
        }
        Ok((start, self.path.clone()))
    }
}

impl fmt::Display for RoadPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(start) = &self.start else {
            return Ok(());
        };
        let end = match start.end {
            Which::Start => "start",
            Which::Finish => "end",
        };
        write!(f, "{end}:{}", start.lane)?;
        for id in &self.path {
            write!(f, ",{id}")?;
        }
        Ok(())
    }
}

/// The start of lane 0 of segment 0 of junction 0.
pub fn default_start(source: &dyn RoadGeometry) -> Result<LaneEnd, CircuitError> {
    let lane = source
        .junction(0)
        .and_then(|junction| junction.segment(0))
        .and_then(|segment| segment.lane(0))
        .ok_or(CircuitError::EmptyNetwork)?;
    Ok(LaneEnd::start(lane.id().clone()))
}
