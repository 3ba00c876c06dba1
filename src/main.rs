use driftfield::Simulation;

fn main() {
    if let Err(e) = Simulation::new().with_particle_count(20_000).run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
