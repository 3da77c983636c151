use copter_simulation::*;

use nalgebra::Vector3;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let spec = VehicleSpec::quadcopter(
        Vector3::new(0.0, 0.0, 2.0),
        Vector3::zeros(),
        1.2,  // kg
        0.3,  // arm length, m
        0.1,  // body radius, m
        10.0, // propeller diameter, in
        4.5,  // propeller pitch, in
    );

    let mut simulation = Simulation::new(vec![("quad".to_string(), spec)])?;

    // Slightly above hover speed, so the vehicle climbs gently.
    simulation.set_rotor_speeds("quad", &[5000.0; 4])?;
    simulation.start_clock(DEFAULT_TIME_STEP, DEFAULT_TIME_SCALING);

    for _ in 0..20 {
        thread::sleep(Duration::from_millis(100));

        let position = simulation.position("quad")?;
        let orientation = simulation.orientation("quad")?;
        println!(
            "t={:6.3}s | pos: x={:7.3} y={:7.3} z={:7.3} m | roll={:6.3} pitch={:6.3} yaw={:6.3} rad",
            simulation.simulation_time(),
            position.x,
            position.y,
            position.z,
            orientation.x,
            orientation.y,
            orientation.z
        );
    }

    simulation.stop_clock();
    simulation.join_clock();
    println!("Simulation stopped at t={:.3}s", simulation.simulation_time());

    Ok(())
}
