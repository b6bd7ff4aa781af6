// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Assembles operators into a running graph.
//!
//! The pipeline owns every operator; operators only hold weak links to their
//! outputs. Building is all-or-nothing: the first configuration error aborts
//! and nothing partially built is returned.

mod validation;

use std::sync::Arc;
use std::time::Instant;

use crate::config::OperatorConfig;
use crate::errors::{ConfigError, ProcessingError};
use crate::observability::messages::{
    pipeline::{
        OperatorLifecycleFailed, PipelineBuildFailed, PipelineBuilt, PipelineStarted,
        PipelineStopped,
    },
    StructuredLog,
};
use crate::operator::{BuildContext, Logger, Registry};
use crate::traits::{Builder, Operator};

pub struct Pipeline {
    /// Upstream operators come before their outputs.
    operators: Vec<Arc<dyn Operator>>,
    logger: Logger,
}

impl Pipeline {
    /// Resolves each configuration through `registry` and builds the pipeline.
    pub fn build(
        configs: &[OperatorConfig],
        registry: &Registry,
        logger: Logger,
    ) -> Result<Self, ConfigError> {
        let builders = configs
            .iter()
            .map(|config| config.builder(registry))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| log_build_failure(&logger, e))?;
        Self::from_builders(&builders, logger)
    }

    /// Builds, validates and links already-resolved builders.
    pub fn from_builders(builders: &[Box<dyn Builder>], logger: Logger) -> Result<Self, ConfigError> {
        Self::assemble(builders, &logger)
            .map(|operators| {
                logger.in_scope(|| {
                    PipelineBuilt {
                        operator_count: operators.len(),
                    }
                    .log()
                });
                Self {
                    operators,
                    logger: logger.clone(),
                }
            })
            .map_err(|e| log_build_failure(&logger, e))
    }

    fn assemble(
        builders: &[Box<dyn Builder>],
        logger: &Logger,
    ) -> Result<Vec<Arc<dyn Operator>>, ConfigError> {
        validation::validate_unique_ids(builders.iter().map(|builder| builder.id()))?;

        let context = BuildContext::new(logger.clone())
            .with_operator_ids(builders.iter().map(|builder| builder.id()));
        let operators = builders
            .iter()
            .map(|builder| builder.build(&context))
            .collect::<Result<Vec<_>, _>>()?;

        let nodes: Vec<(String, Vec<String>)> = operators
            .iter()
            .map(|operator| (operator.id().to_string(), operator.output_ids()))
            .collect();
        let order = validation::topological_order(&nodes)?;

        for operator in operators.iter().filter(|operator| operator.can_output()) {
            operator.set_outputs(&operators)?;
        }

        Ok(order
            .into_iter()
            .map(|index| Arc::clone(&operators[index]))
            .collect())
    }

    /// Operators in topological order.
    pub fn operators(&self) -> &[Arc<dyn Operator>] {
        &self.operators
    }

    pub fn operator(&self, id: &str) -> Option<Arc<dyn Operator>> {
        self.operators
            .iter()
            .find(|operator| operator.id() == id)
            .cloned()
    }

    /// Starts every operator, outputs before the operators feeding them. If
    /// one fails, the operators already started are stopped again.
    pub async fn start(&self) -> Result<(), ProcessingError> {
        let started_at = Instant::now();
        let mut started: Vec<&Arc<dyn Operator>> = Vec::with_capacity(self.operators.len());

        for operator in self.operators.iter().rev() {
            if let Err(error) = operator.start().await {
                self.log_lifecycle_failure(operator.id(), "start", &error);
                for running in started.iter().rev() {
                    if let Err(stop_error) = running.stop().await {
                        self.log_lifecycle_failure(running.id(), "stop", &stop_error);
                    }
                }
                return Err(error);
            }
            started.push(operator);
        }

        self.logger.in_scope(|| {
            PipelineStarted {
                operator_count: self.operators.len(),
                duration: started_at.elapsed(),
            }
            .log()
        });
        Ok(())
    }

    /// Stops every operator, inputs first. All operators are attempted; the
    /// first failure is returned.
    pub async fn stop(&self) -> Result<(), ProcessingError> {
        let mut first_error = None;
        for operator in &self.operators {
            if let Err(error) = operator.stop().await {
                self.log_lifecycle_failure(operator.id(), "stop", &error);
                first_error.get_or_insert(error);
            }
        }

        self.logger.in_scope(|| {
            PipelineStopped {
                operator_count: self.operators.len(),
            }
            .log()
        });
        first_error.map_or(Ok(()), Err)
    }

    fn log_lifecycle_failure(&self, operator_id: &str, phase: &str, error: &ProcessingError) {
        self.logger.in_scope(|| {
            OperatorLifecycleFailed {
                operator_id,
                phase,
                error,
            }
            .log()
        });
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("operators", &self.operators)
            .finish()
    }
}

fn log_build_failure(logger: &Logger, error: ConfigError) -> ConfigError {
    logger.in_scope(|| {
        PipelineBuildFailed {
            operator_id: &error.operator_id,
            error: &error,
        }
        .log()
    });
    error
}
