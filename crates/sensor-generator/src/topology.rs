//! Static node/sensor/feature lookup tables.

/// A simulated device hosting one or more sensors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Node {
    pub id: &'static str,
    /// Sensor identifiers physically attached to this node, in declaration order.
    pub sensors: &'static [&'static str],
}

/// A simulated measurement device and the features it reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sensor {
    pub id: &'static str,
    pub features: &'static [&'static str],
}

/// Errors found while validating a topology.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopologyError {
    #[error("Topology declares no nodes")]
    NoNodes,

    #[error("Node '{0}' has no sensors attached")]
    NodeWithoutSensors(&'static str),

    #[error("Node '{node}' references undeclared sensor '{sensor}'")]
    UnknownSensor {
        node: &'static str,
        sensor: &'static str,
    },

    #[error("Sensor '{0}' declares no features")]
    SensorWithoutFeatures(&'static str),

    #[error("Sensor '{0}' is attached to more than one node")]
    SharedSensor(&'static str),
}

/// Node→Sensors and Sensor→Features mappings.
///
/// Both tables are plain static slices so a topology can live in a `static`
/// and be shared read-only for the whole process.
#[derive(Debug, Clone, Copy)]
pub struct Topology {
    nodes: &'static [Node],
    sensors: &'static [Sensor],
}

/// The development topology the producer publishes from.
pub static DEV_TOPOLOGY: Topology = Topology::new(
    &[
        Node {
            id: "node_dev_1",
            sensors: &["sensor_dev_1", "sensor_dev_4"],
        },
        Node {
            id: "node_dev_2",
            sensors: &["sensor_dev_2", "sensor_dev_3"],
        },
    ],
    &[
        Sensor {
            id: "sensor_dev_1",
            features: &["mag_x", "mag_y"],
        },
        Sensor {
            id: "sensor_dev_2",
            features: &["humidity"],
        },
        Sensor {
            id: "sensor_dev_3",
            features: &["n2", "co2"],
        },
        Sensor {
            id: "sensor_dev_4",
            features: &["temp", "mag_z", "oxygen"],
        },
    ],
);

impl Topology {
    pub const fn new(nodes: &'static [Node], sensors: &'static [Sensor]) -> Self {
        Self { nodes, sensors }
    }

    pub fn nodes(&self) -> &'static [Node] {
        self.nodes
    }

    pub fn sensors(&self) -> &'static [Sensor] {
        self.sensors
    }

    /// Sensors attached to `node_id`, or `None` for an unknown node.
    pub fn sensors_for(&self, node_id: &str) -> Option<&'static [&'static str]> {
        self.nodes
            .iter()
            .find(|node| node.id == node_id)
            .map(|node| node.sensors)
    }

    /// Features reported by `sensor_id`, or `None` for an unknown sensor.
    pub fn features_for(&self, sensor_id: &str) -> Option<&'static [&'static str]> {
        self.sensors
            .iter()
            .find(|sensor| sensor.id == sensor_id)
            .map(|sensor| sensor.features)
    }

    /// Check that every random choice made against this topology has at
    /// least one candidate and every referenced sensor is declared.
    pub fn validate(&self) -> Result<(), TopologyError> {
        if self.nodes.is_empty() {
            return Err(TopologyError::NoNodes);
        }

        let mut attached: Vec<&'static str> = Vec::new();
        for node in self.nodes {
            if node.sensors.is_empty() {
                return Err(TopologyError::NodeWithoutSensors(node.id));
            }
            for &sensor in node.sensors {
                let features =
                    self.features_for(sensor)
                        .ok_or(TopologyError::UnknownSensor {
                            node: node.id,
                            sensor,
                        })?;
                if features.is_empty() {
                    return Err(TopologyError::SensorWithoutFeatures(sensor));
                }
                if attached.contains(&sensor) {
                    return Err(TopologyError::SharedSensor(sensor));
                }
                attached.push(sensor);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_topology_is_valid() {
        assert_eq!(DEV_TOPOLOGY.validate(), Ok(()));
        assert_eq!(DEV_TOPOLOGY.nodes().len(), 2);
        assert_eq!(DEV_TOPOLOGY.sensors().len(), 4);
    }

    #[test]
    fn test_lookups() {
        assert_eq!(
            DEV_TOPOLOGY.sensors_for("node_dev_1"),
            Some(&["sensor_dev_1", "sensor_dev_4"][..])
        );
        assert_eq!(
            DEV_TOPOLOGY.features_for("sensor_dev_3"),
            Some(&["n2", "co2"][..])
        );
        assert_eq!(DEV_TOPOLOGY.sensors_for("node_dev_9"), None);
        assert_eq!(DEV_TOPOLOGY.features_for("sensor_dev_9"), None);
    }

    #[test]
    fn test_validate_rejects_empty_topology() {
        let topology = Topology::new(&[], &[]);
        assert_eq!(topology.validate(), Err(TopologyError::NoNodes));
    }

    #[test]
    fn test_validate_rejects_node_without_sensors() {
        static NODES: [Node; 1] = [Node {
            id: "lonely",
            sensors: &[],
        }];
        let topology = Topology::new(&NODES, &[]);
        assert_eq!(
            topology.validate(),
            Err(TopologyError::NodeWithoutSensors("lonely"))
        );
    }

    #[test]
    fn test_validate_rejects_unknown_sensor() {
        static NODES: [Node; 1] = [Node {
            id: "n",
            sensors: &["missing"],
        }];
        let topology = Topology::new(&NODES, &[]);
        assert_eq!(
            topology.validate(),
            Err(TopologyError::UnknownSensor {
                node: "n",
                sensor: "missing"
            })
        );
    }

    #[test]
    fn test_validate_rejects_sensor_without_features() {
        static NODES: [Node; 1] = [Node {
            id: "n",
            sensors: &["s"],
        }];
        static SENSORS: [Sensor; 1] = [Sensor {
            id: "s",
            features: &[],
        }];
        let topology = Topology::new(&NODES, &SENSORS);
        assert_eq!(
            topology.validate(),
            Err(TopologyError::SensorWithoutFeatures("s"))
        );
    }

    #[test]
    fn test_validate_rejects_shared_sensor() {
        static NODES: [Node; 2] = [
            Node {
                id: "a",
                sensors: &["s"],
            },
            Node {
                id: "b",
                sensors: &["s"],
            },
        ];
        static SENSORS: [Sensor; 1] = [Sensor {
            id: "s",
            features: &["x"],
        }];
        let topology = Topology::new(&NODES, &SENSORS);
        assert_eq!(topology.validate(), Err(TopologyError::SharedSensor("s")));
    }
}
