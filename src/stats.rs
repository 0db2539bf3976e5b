//! Rolling metrics for the graphs window.

/// Fixed-capacity sample buffer; once full, each push overwrites the oldest
/// sample.
pub struct RingBuffer {
    data: Vec<f32>,
    head: usize,
    len: usize,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0.0; capacity],
            head: 0,
            len: 0,
            capacity,
        }
    }

    pub fn push(&mut self, value: f32) {
        self.data[self.head] = value;
        self.head = (self.head + 1) % self.capacity;
        if self.len < self.capacity {
            self.len += 1;
        }
    }

    /// Samples in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        let start = if self.len < self.capacity {
            0
        } else {
            self.head
        };
        (0..self.len).map(move |i| self.data[(start + i) % self.capacity])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn last(&self) -> Option<f32> {
        if self.len == 0 {
            None
        } else {
            let idx = (self.head + self.capacity - 1) % self.capacity;
            Some(self.data[idx])
        }
    }
}

/// Everything the statistics window plots.
pub struct SimStats {
    pub population: RingBuffer,
    pub avg_health: RingBuffer,
    pub food_count: RingBuffer,
    pub poison_count: RingBuffer,
    pub births: RingBuffer,
    pub deaths: RingBuffer,

    // Accumulated between samples
    pub births_pending: u32,
    pub deaths_pending: u32,
    pub sample_interval: u32,
    pub tick_counter: u32,
}

impl SimStats {
    pub fn new(capacity: usize) -> Self {
        Self {
            population: RingBuffer::new(capacity),
            avg_health: RingBuffer::new(capacity),
            food_count: RingBuffer::new(capacity),
            poison_count: RingBuffer::new(capacity),
            births: RingBuffer::new(capacity),
            deaths: RingBuffer::new(capacity),
            births_pending: 0,
            deaths_pending: 0,
            sample_interval: 10,
            tick_counter: 0,
        }
    }

    /// Record one tick's numbers. Births and deaths accumulate until the
    /// sampling interval elapses, everything else keeps the latest value.
    pub fn record(
        &mut self,
        population: usize,
        avg_health: f32,
        food_count: usize,
        poison_count: usize,
        births: u32,
        deaths: u32,
    ) {
        self.births_pending += births;
        self.deaths_pending += deaths;

        self.tick_counter += 1;
        if self.tick_counter % self.sample_interval != 0 {
            return;
        }

        self.population.push(population as f32);
        self.avg_health.push(avg_health);
        self.food_count.push(food_count as f32);
        self.poison_count.push(poison_count as f32);
        self.births.push(self.births_pending as f32);
        self.deaths.push(self.deaths_pending as f32);

        self.births_pending = 0;
        self.deaths_pending = 0;
    }
}
