//! Rolling history for the in-app graphs.

/// Ring buffer that stores the last N samples of a metric.
pub struct RingBuffer {
    data: Vec<f32>,
    head: usize,
    len: usize,
    capacity: usize,
}

impl RingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
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

    /// Return samples in chronological order.
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

/// Session metrics sampled every `sample_interval` ticks.
pub struct SessionGraphs {
    pub star_count: RingBuffer,
    pub snake_length: RingBuffer,
    pub chimes: RingBuffer,

    pub chimes_since_sample: u32,
    pub sample_interval: u32,
    pub tick_counter: u32,
}

impl SessionGraphs {
    pub fn new(capacity: usize) -> Self {
        Self {
            star_count: RingBuffer::new(capacity),
            snake_length: RingBuffer::new(capacity),
            chimes: RingBuffer::new(capacity),
            chimes_since_sample: 0,
            sample_interval: 30,
            tick_counter: 0,
        }
    }

    /// Record one tick. Chimes accumulate between samples.
    pub fn record(&mut self, star_count: usize, snake_length: usize, chimes_this_tick: u32) {
        self.chimes_since_sample += chimes_this_tick;

        self.tick_counter += 1;
        if self.tick_counter % self.sample_interval != 0 {
            return;
        }

        self.star_count.push(star_count as f32);
        self.snake_length.push(snake_length as f32);
        self.chimes.push(self.chimes_since_sample as f32);
        self.chimes_since_sample = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_buffer_iterates_in_insertion_order_after_wrap() {
        let mut buf = RingBuffer::new(3);
        buf.push(1.0);
        buf.push(2.0);
        buf.push(3.0);
        buf.push(4.0);

        let values: Vec<f32> = buf.iter().collect();
        assert_eq!(values, vec![2.0, 3.0, 4.0]);
        assert_eq!(buf.last(), Some(4.0));
    }

    #[test]
    fn chimes_accumulate_between_samples() {
        let mut graphs = SessionGraphs::new(8);
        graphs.sample_interval = 2;

        graphs.record(30, 40, 1);
        assert_eq!(graphs.chimes.len(), 0);

        graphs.record(31, 41, 2);
        let chimes: Vec<f32> = graphs.chimes.iter().collect();
        assert_eq!(chimes, vec![3.0]);
        assert_eq!(graphs.star_count.last(), Some(31.0));
        assert_eq!(graphs.snake_length.last(), Some(41.0));
        assert_eq!(graphs.chimes_since_sample, 0);
    }
}
