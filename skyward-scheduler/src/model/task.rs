/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! The unit of scheduling.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use super::error::ModelError;
use super::resources::{CpuArchitecture, ResourceMap};
use super::slos::DataSourceSLO;

/// A single task to be scheduled.
///
/// Validation happens at construction: an empty name, an empty resource
/// request, or an empty architecture list is a configuration error, not a
/// scheduling failure.
#[derive(Debug, Clone)]
pub struct Task {
    /// The name of this task (unique within a workflow).
    pub name: String,

    /// The container image for this task.
    pub image: String,

    /// Minimum resource quantities a node must have free to host this task.
    /// Not every task requests every kind of resource.
    pub req_resources: ResourceMap,

    /// The CPU architectures the container image supports.
    pub cpu_architectures: Vec<CpuArchitecture>,

    /// SLOs for the connections from fixed external data sources.
    pub data_source_slos: Vec<DataSourceSLO>,

    /// Expected execution time per architecture, in milliseconds. Used by
    /// the heat estimator; tasks without an entry for a node's architecture
    /// get no thermal prediction there.
    pub expected_exec_time_msec: BTreeMap<CpuArchitecture, i64>,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        image: impl Into<String>,
        req_resources: ResourceMap,
        cpu_architectures: Vec<CpuArchitecture>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ModelError::EmptyTaskName);
        }
        if req_resources.is_empty() {
            return Err(ModelError::EmptyResources { task: name });
        }
        if cpu_architectures.is_empty() {
            return Err(ModelError::NoCpuArchitecture { task: name });
        }
        Ok(Self {
            name,
            image: image.into(),
            req_resources,
            cpu_architectures,
            data_source_slos: Vec::new(),
            expected_exec_time_msec: BTreeMap::new(),
        })
    }

    pub fn with_data_source_slos(mut self, slos: Vec<DataSourceSLO>) -> Self {
        self.data_source_slos = slos;
        self
    }

    pub fn with_expected_exec_time(mut self, times: BTreeMap<CpuArchitecture, i64>) -> Self {
        self.expected_exec_time_msec = times;
        self
    }

    pub fn supports_arch(&self, arch: CpuArchitecture) -> bool {
        self.cpu_architectures.contains(&arch)
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.image == other.image
            && self.req_resources == other.req_resources
            && self.cpu_architectures == other.cpu_architectures
            && self.data_source_slos == other.data_source_slos
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResourceKind;

    fn resources() -> ResourceMap {
        ResourceMap::from([(ResourceKind::MilliCpu, 1000), (ResourceKind::MemoryMib, 2048)])
    }

    #[test]
    fn valid_task_is_accepted() {
        let task = Task::new("ingest", "registry/ingest", resources(), vec![CpuArchitecture::Arm64]);
        assert!(task.is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = Task::new("", "img", resources(), vec![CpuArchitecture::Arm64]).unwrap_err();
        assert_eq!(err, ModelError::EmptyTaskName);
    }

    #[test]
    fn empty_resources_are_rejected() {
        let err =
            Task::new("t", "img", ResourceMap::new(), vec![CpuArchitecture::Arm64]).unwrap_err();
        assert!(matches!(err, ModelError::EmptyResources { .. }));
    }

    #[test]
    fn empty_architecture_list_is_rejected() {
        let err = Task::new("t", "img", resources(), vec![]).unwrap_err();
        assert!(matches!(err, ModelError::NoCpuArchitecture { .. }));
    }

    #[test]
    fn equality_is_structural() {
        let a = Task::new("t", "img", resources(), vec![CpuArchitecture::Arm64]).unwrap();
        let b = Task::new("t", "img", resources(), vec![CpuArchitecture::Arm64]).unwrap();
        let c = Task::new("t", "other-img", resources(), vec![CpuArchitecture::Arm64]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn supports_arch_checks_membership() {
        let task = Task::new("t", "img", resources(), vec![CpuArchitecture::Arm64]).unwrap();
        assert!(task.supports_arch(CpuArchitecture::Arm64));
        assert!(!task.supports_arch(CpuArchitecture::Intel64));
    }
}
