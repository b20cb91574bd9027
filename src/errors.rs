use error_chain::*;

error_chain! {

    errors {
        // Grid parameters rejected before any allocation happens.
        InvalidParameters(dimension: usize, size: usize) {
            description("invalid maze parameters")
            display("invalid maze parameters: dimension {} must be >= 1 and size {} must be >= 2 \
                     (and the cell count must fit the machine word)", dimension, size)
        }
        // A cell index or coordinate component falls outside the grid.
        OutOfRange(value: usize, limit: usize) {
            description("cell index or coordinate out of range")
            display("index or coordinate value {} out of range (limit {})", value, limit)
        }
        // Defensive ceiling on the carve/validate retry loop.
        GenerationRetriesExhausted(attempts: usize) {
            description("maze generation retry limit hit")
            display("maze generation failed to connect the grid within {} attempts", attempts)
        }
    }
}
