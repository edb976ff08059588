/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Network service-level objectives attached to workflow links and data
//! sources.

use std::rc::Rc;

use super::node::SharedNode;

/// An SLO for an incoming connection to a task.
///
/// Both bounds are optional; a missing value means "no constraint on this
/// dimension". Bandwidth is declared but currently not enforced anywhere in
/// the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetworkSLO {
    pub min_bandwidth_kbps: Option<i64>,
    pub max_latency_msec: Option<i64>,
}

impl NetworkSLO {
    /// An SLO constraining only latency.
    pub fn max_latency(msec: i64) -> Self {
        Self {
            min_bandwidth_kbps: None,
            max_latency_msec: Some(msec),
        }
    }
}

/// An SLO for the link between a fixed external data source (e.g. an
/// earth-observation satellite) and the task consuming its output.
#[derive(Debug, Clone)]
pub struct DataSourceSLO {
    pub slo: NetworkSLO,
    pub data_source: SharedNode,
}

impl DataSourceSLO {
    pub fn new(data_source: SharedNode, slo: NetworkSLO) -> Self {
        Self { slo, data_source }
    }
}

impl PartialEq for DataSourceSLO {
    fn eq(&self, other: &Self) -> bool {
        if self.slo != other.slo {
            return false;
        }
        Rc::ptr_eq(&self.data_source, &other.data_source)
            || self.data_source.borrow().name == other.data_source.borrow().name
    }
}
