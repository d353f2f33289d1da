// Hardware abstraction layers

pub mod serial;
