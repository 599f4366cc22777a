//! Cycle benchmark — measure one full read+write pass for N-joint
//! configurations over the loopback transport.
//!
//! The bridge targets low-millisecond control periods; a pass over the
//! in-memory transport should be far below that, leaving the budget to the
//! real transport.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use odrive_bridge::bridge::OdriveBridge;
use odrive_bridge::loopback::LoopbackTransport;
use odrive_bridge::state::ControlMode;
use odrive_common::config::{InterfaceKind, JointSpec};
use odrive_common::registers::RegisterLayout;
use std::collections::HashMap;

fn joint_spec(name: &str, axis: u8, kv: f64) -> JointSpec {
    let ifaces = || {
        vec![
            "position".to_string(),
            "velocity".to_string(),
            "effort".to_string(),
        ]
    };
    let mut parameters = HashMap::new();
    parameters.insert("axis".to_string(), axis.to_string());
    parameters.insert("KV".to_string(), kv.to_string());
    JointSpec {
        name: name.to_string(),
        command_interfaces: ifaces(),
        state_interfaces: ifaces(),
        parameters,
    }
}

fn build_bridge(joints: usize) -> OdriveBridge {
    let specs: Vec<JointSpec> = (0..joints)
        .map(|i| joint_spec(&format!("joint{i}"), i as u8, 100.0 + i as f64))
        .collect();
    let layout = RegisterLayout::default();
    let mut bridge = OdriveBridge::new(
        Box::new(LoopbackTransport::with_echo(layout.clone())),
        layout,
        &specs,
    )
    .expect("bridge should configure");

    for i in 0..joints {
        let name = format!("joint{i}");
        bridge.claim(&name, ControlMode::Velocity).unwrap();
        bridge
            .set_command(&name, InterfaceKind::Velocity, 1.5)
            .unwrap();
    }
    bridge.start().unwrap();
    bridge
}

fn bench_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("read_write_pass");
    for joints in [1usize, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::from_parameter(joints),
            &joints,
            |b, &joints| {
                let mut bridge = build_bridge(joints);
                b.iter(|| {
                    bridge.read().expect("read pass");
                    bridge.write().expect("write pass");
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_cycle);
criterion_main!(benches);
