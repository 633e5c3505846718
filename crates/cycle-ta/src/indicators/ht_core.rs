//! Shared Hilbert Transform cycle engine.
//!
//! All six `ht_*` indicators run the same front pipeline over the input
//! series, one bar at a time: a 4-tap weighted price smoother, a bank of
//! four all-pass quadrature filters with separate even/odd-bar state, and a
//! homodyne discriminator that feeds the measured period back into the
//! filter gain. The algorithm follows John Ehlers' cycle-measurement work
//! and reproduces the reference TA-Lib streaming semantics, including its
//! warm-up schedule and clamp ordering.
//!
//! The engine keeps no state between calls; each public indicator builds a
//! fresh [`HtPipeline`] per invocation, seeded `lookback` bars before the
//! first requested output bar.

use crate::traits::SeriesElement;

/// Structural lookback of the period/phasor outputs.
pub(crate) const CYCLE_LOOKBACK: usize = 32;

/// Structural lookback of the phase/sine/trendline/trend-mode outputs,
/// which need extra settling for the phase-correlation stage.
pub(crate) const PHASE_LOOKBACK: usize = 63;

/// Price-smoother settle iterations after seeding, for the 32-bar family.
pub(crate) const CYCLE_SETTLE_BARS: usize = 9;

/// Price-smoother settle iterations after seeding, for the 63-bar family.
pub(crate) const PHASE_SETTLE_BARS: usize = 34;

/// Capacity of the smoothed-price history ring.
const SMOOTH_PRICE_LEN: usize = 50;

// All-pass coefficient pair shared by the four quadrature filters.
const A: f64 = 0.0962;
const B: f64 = 0.5769;

// Hard bounds on the adaptive period, in bars.
const MIN_PERIOD: f64 = 6.0;
const MAX_PERIOD: f64 = 50.0;

/// Incremental 4-tap weighted moving average over the raw price, weights
/// 4/3/2/1 with the newest bar weighted highest, divided by 10.
///
/// The rolling sums are seeded from the first three bars (weights 1, 2, 3)
/// and updated in O(1) per bar afterwards; `trailing_idx` chases the bar
/// leaving the window.
#[derive(Debug, Clone)]
struct PriceSmoother<T> {
    sub: T,
    sum: T,
    trailing_value: T,
    trailing_idx: usize,
}

impl<T: SeriesElement> PriceSmoother<T> {
    fn new(data: &[T], seed_idx: usize) -> Self {
        let mut sub = data[seed_idx];
        let mut sum = data[seed_idx];
        sub = sub + data[seed_idx + 1];
        sum = sum + data[seed_idx + 1] * T::two();
        sub = sub + data[seed_idx + 2];
        sum = sum + data[seed_idx + 2] * T::constant(3.0);
        Self {
            sub,
            sum,
            trailing_value: T::zero(),
            trailing_idx: seed_idx,
        }
    }

    fn update(&mut self, data: &[T], price: T) -> T {
        self.sub = self.sub + price - self.trailing_value;
        self.sum = self.sum + price * T::constant(4.0);
        self.trailing_value = data[self.trailing_idx];
        self.trailing_idx += 1;
        let smoothed = self.sum * T::constant(0.1);
        self.sum = self.sum - self.sub;
        smoothed
    }
}

/// One all-pass quadrature filter with separate state per bar parity.
///
/// Index 0 holds the even-bar channel, index 1 the odd-bar channel. Each
/// channel carries a 3-slot ring of scaled inputs (the 6-bars-back tap), a
/// carried b-term, and the previous same-parity input. A step over the
/// same-parity sample chain x computes
/// `a*x[t] - a*x[t-6] - b*x[t-4] + b*x[t-2]`, scaled by the adaptive gain.
#[derive(Debug, Clone)]
struct QuadratureFilter<T> {
    ring: [[T; 3]; 2],
    prev: [T; 2],
    prev_input: [T; 2],
}

impl<T: SeriesElement> QuadratureFilter<T> {
    fn new() -> Self {
        Self {
            ring: [[T::zero(); 3]; 2],
            prev: [T::zero(); 2],
            prev_input: [T::zero(); 2],
        }
    }

    fn step(&mut self, parity: usize, tap: usize, input: T, gain: T) -> T {
        let scaled = T::constant(A) * input;
        let mut out = scaled - self.ring[parity][tap];
        self.ring[parity][tap] = scaled;
        out = out - self.prev[parity];
        self.prev[parity] = T::constant(B) * self.prev_input[parity];
        out = out + self.prev[parity];
        self.prev_input[parity] = input;
        out * gain
    }
}

/// Per-bar snapshot of the shared pipeline, captured before the cross-parity
/// delay slots shift. `in_phase`/`quadrature` are the raw I1/Q1 phasor pair
/// for the current bar.
#[derive(Debug, Clone, Copy)]
pub(crate) struct HtSample<T> {
    pub smoothed: T,
    pub in_phase: T,
    pub quadrature: T,
    pub smooth_period: T,
}

/// The shared cycle-measurement pipeline.
///
/// Owns every piece of per-call filter state: the price smoother, the four
/// quadrature filters, the cross-parity I1 delay slots, the homodyne
/// accumulators, the adaptive period pair, and the smoothed-price ring used
/// by the phase stage. All state is freshly zeroed per invocation.
#[derive(Debug, Clone)]
pub(crate) struct HtPipeline<T> {
    smoother: PriceSmoother<T>,
    detrender: QuadratureFilter<T>,
    quadrature: QuadratureFilter<T>,
    phase_advance_i: QuadratureFilter<T>,
    phase_advance_q: QuadratureFilter<T>,
    /// Rotating index into the 3-slot filter rings; advances on even bars.
    tap_idx: usize,
    /// Detrender values delayed two and three same-parity steps, indexed by
    /// the parity that will consume them. Even bars read slot 0 and refill
    /// slot 1, odd bars the reverse.
    i1_prev2: [T; 2],
    i1_prev3: [T; 2],
    prev_i2: T,
    prev_q2: T,
    re: T,
    im: T,
    period: T,
    smooth_period: T,
    smooth_price: [T; SMOOTH_PRICE_LEN],
    smooth_price_idx: usize,
    today: usize,
}

impl<T: SeriesElement> HtPipeline<T> {
    /// Builds a pipeline seeded at `seed_idx` and runs the price smoother
    /// for `settle_bars` iterations, leaving `today` at the first bar the
    /// main loop will process.
    pub(crate) fn seeded(data: &[T], seed_idx: usize, settle_bars: usize) -> Self {
        let mut smoother = PriceSmoother::new(data, seed_idx);
        let mut today = seed_idx + 3;
        for _ in 0..settle_bars {
            let price = data[today];
            smoother.update(data, price);
            today += 1;
        }
        Self {
            smoother,
            detrender: QuadratureFilter::new(),
            quadrature: QuadratureFilter::new(),
            phase_advance_i: QuadratureFilter::new(),
            phase_advance_q: QuadratureFilter::new(),
            tap_idx: 0,
            i1_prev2: [T::zero(); 2],
            i1_prev3: [T::zero(); 2],
            prev_i2: T::zero(),
            prev_q2: T::zero(),
            re: T::zero(),
            im: T::zero(),
            period: T::zero(),
            smooth_period: T::zero(),
            smooth_price: [T::zero(); SMOOTH_PRICE_LEN],
            smooth_price_idx: 0,
            today,
        }
    }

    /// The input bar the next [`step`](Self::step) call will process.
    pub(crate) fn today(&self) -> usize {
        self.today
    }

    /// Processes one bar: smooths the price, runs the four quadrature
    /// filters for the bar's parity, and updates the homodyne period
    /// estimate. Does not advance the bar cursor; callers run their
    /// trailing stage and then call [`advance`](Self::advance).
    pub(crate) fn step(&mut self, data: &[T]) -> HtSample<T> {
        let gain = T::constant(0.075) * self.period + T::constant(0.54);
        let price = data[self.today];
        let smoothed = self.smoother.update(data, price);
        self.smooth_price[self.smooth_price_idx] = smoothed;

        let parity = self.today & 1;
        let detrended = self.detrender.step(parity, self.tap_idx, smoothed, gain);
        let q1 = self.quadrature.step(parity, self.tap_idx, detrended, gain);
        let i1 = self.i1_prev3[parity];
        let ji = self.phase_advance_i.step(parity, self.tap_idx, i1, gain);
        let jq = self.phase_advance_q.step(parity, self.tap_idx, q1, gain);
        if parity == 0 {
            self.tap_idx += 1;
            if self.tap_idx == 3 {
                self.tap_idx = 0;
            }
        }

        let alpha = T::constant(0.2);
        let decay = T::constant(0.8);
        let q2 = alpha * (q1 + ji) + decay * self.prev_q2;
        let i2 = alpha * (i1 - jq) + decay * self.prev_i2;

        // This bar's detrender feeds the opposite parity three bars out.
        let other = parity ^ 1;
        self.i1_prev3[other] = self.i1_prev2[other];
        self.i1_prev2[other] = detrended;

        self.re = alpha * (i2 * self.prev_i2 + q2 * self.prev_q2) + decay * self.re;
        self.im = alpha * (i2 * self.prev_q2 - q2 * self.prev_i2) + decay * self.im;
        self.prev_q2 = q2;
        self.prev_i2 = i2;

        let prior = self.period;
        if self.im != T::zero() && self.re != T::zero() {
            let rad_to_deg = T::constant(180.0 / std::f64::consts::PI);
            self.period = T::constant(360.0) / ((self.im / self.re).atan() * rad_to_deg);
        }
        let ceiling = T::constant(1.5) * prior;
        if self.period > ceiling {
            self.period = ceiling;
        }
        let floor = T::constant(0.67) * prior;
        if self.period < floor {
            self.period = floor;
        }
        if self.period < T::constant(MIN_PERIOD) {
            self.period = T::constant(MIN_PERIOD);
        } else if self.period > T::constant(MAX_PERIOD) {
            self.period = T::constant(MAX_PERIOD);
        }
        self.period = alpha * self.period + decay * prior;
        self.smooth_period =
            T::constant(0.33) * self.period + T::constant(0.67) * self.smooth_period;

        HtSample {
            smoothed,
            in_phase: i1,
            quadrature: q1,
            smooth_period: self.smooth_period,
        }
    }

    /// Moves the bar cursor and the smoothed-price ring cursor forward.
    pub(crate) fn advance(&mut self) {
        self.smooth_price_idx += 1;
        if self.smooth_price_idx == SMOOTH_PRICE_LEN {
            self.smooth_price_idx = 0;
        }
        self.today += 1;
    }

    /// Dominant-cycle window in bars: the smoothed period rounded to the
    /// nearest integer.
    pub(crate) fn cycle_window(&self) -> usize {
        (self.smooth_period + T::constant(0.5))
            .to_usize()
            .unwrap_or(0)
    }

    /// Arithmetic mean of the most recent [`cycle_window`](Self::cycle_window)
    /// raw prices, ending at the current bar. Returns zero for an empty
    /// window, matching the reference warm-up behavior.
    pub(crate) fn cycle_average(&self, data: &[T]) -> T {
        let window = self.cycle_window();
        let mut sum = T::zero();
        // The window never reaches past the seeded warm-up bars: the
        // smoothed period grows from zero by at most a 0.2 blend per bar
        // while the cursor advances a full bar.
        for k in 0..window {
            sum = sum + data[self.today - k];
        }
        if window > 0 {
            sum / T::constant(window as f64)
        } else {
            sum
        }
    }

    /// Dominant-cycle phase in degrees for the current bar.
    ///
    /// Correlates the smoothed-price ring against one cycle of sine/cosine
    /// over the dominant-cycle window, walking backward from the ring
    /// cursor. When the cosine projection carries no energy the previous
    /// phase is continued, nudged ±90° by the sign of the sine projection,
    /// instead of letting the estimate jump.
    pub(crate) fn dominant_cycle_phase(&self, prev_phase: T) -> T {
        let window = self.cycle_window();
        let two_pi = T::constant(2.0 * std::f64::consts::PI);
        let rad_to_deg = T::constant(180.0 / std::f64::consts::PI);
        let window_t = T::constant(window as f64);

        let mut real_part = T::zero();
        let mut imag_part = T::zero();
        let mut idx = self.smooth_price_idx;
        for k in 0..window {
            let angle = (T::constant(k as f64) * two_pi) / window_t;
            let value = self.smooth_price[idx];
            real_part = real_part + angle.sin() * value;
            imag_part = imag_part + angle.cos() * value;
            idx = if idx == 0 { SMOOTH_PRICE_LEN - 1 } else { idx - 1 };
        }

        let ninety = T::constant(90.0);
        let abs_imag = imag_part.abs();
        let mut phase = prev_phase;
        if abs_imag > T::zero() {
            phase = (real_part / imag_part).atan() * rad_to_deg;
        } else if abs_imag <= T::constant(0.01) {
            if real_part < T::zero() {
                phase = phase - ninety;
            } else if real_part > T::zero() {
                phase = phase + ninety;
            }
        }
        phase = phase + ninety;
        phase = phase + T::constant(360.0) / self.smooth_period;
        if imag_part < T::zero() {
            phase = phase + T::constant(180.0);
        }
        if phase > T::constant(315.0) {
            phase = phase - T::constant(360.0);
        }
        phase
    }
}

/// Effective first output bar for a request: the start index, silently
/// raised to the lookback when it falls inside the warm-up region. Returns
/// `None` when the raised start passes the end index (an empty request).
pub(crate) fn effective_start(
    start_idx: usize,
    end_idx: usize,
    lookback: usize,
) -> Option<usize> {
    let start = start_idx.max(lookback);
    (start <= end_idx).then_some(start)
}
