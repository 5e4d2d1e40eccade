use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

const SPARKS: [char; 6] = ['*', '✦', '✧', '★', '•', '+'];
const WORDS: [&str; 4] = ["YOU WON!", "NAILED IT!", "BULLSEYE!", "SPOT ON!"];
const GRAVITY: f64 = 15.0;
const LETTER_SPACING: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    pub age: f64,
    pub max_age: f64,
    /// Letters fly to a fixed slot and stay; sparks fall away
    pub is_letter: bool,
    pub target_x: f64,
    pub target_y: f64,
}

impl Particle {
    fn spark<R: Rng>(x: f64, y: f64, rng: &mut R) -> Self {
        Self {
            x,
            y,
            vel_x: rng.gen_range(-3.0..3.0),
            vel_y: rng.gen_range(-4.0..-1.0),
            symbol: SPARKS.choose(rng).copied().unwrap_or('*'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(1.5..3.0),
            is_letter: false,
            target_x: x,
            target_y: y,
        }
    }

    fn letter<R: Rng>(from: (f64, f64), to: (f64, f64), symbol: char, rng: &mut R) -> Self {
        Self {
            x: from.0,
            y: from.1,
            vel_x: to.0 - from.0,
            vel_y: to.1 - from.1,
            symbol,
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(2.5..3.5),
            is_letter: true,
            target_x: to.0,
            target_y: to.1,
        }
    }

    fn update(&mut self, dt: f64) -> bool {
        if self.is_letter {
            let distance =
                ((self.target_x - self.x).powi(2) + (self.target_y - self.y).powi(2)).sqrt();
            if distance > 1.0 {
                self.x += self.vel_x * dt;
                self.y += self.vel_y * dt;
                self.vel_x *= 0.95;
                self.vel_y *= 0.95;
            } else {
                self.x = self.target_x;
                self.y = self.target_y;
                self.vel_x = 0.0;
                self.vel_y = 0.0;
            }
        } else {
            self.x += self.vel_x * dt;
            self.y += self.vel_y * dt;
            self.vel_y += GRAVITY * dt;
        }

        self.age += dt;
        self.age < self.max_age
    }

    /// 1.0 when fresh, 0.0 at end of life
    pub fn life(&self) -> f64 {
        (1.0 - self.age / self.max_age).clamp(0.0, 1.0)
    }
}

/// Particle burst shown over the board after a win
#[derive(Debug, Clone)]
pub struct Celebration {
    pub particles: Vec<Particle>,
    pub elapsed: Duration,
    pub duration: Duration,
    pub is_active: bool,
    pub width: f64,
    pub height: f64,
}

impl Celebration {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            elapsed: Duration::ZERO,
            duration: Duration::from_secs(3),
            is_active: false,
            width: 80.0,
            height: 24.0,
        }
    }

    pub fn start(&mut self, width: u16, height: u16) {
        let mut rng = rand::thread_rng();

        self.particles.clear();
        self.elapsed = Duration::ZERO;
        self.is_active = true;
        self.width = f64::from(width);
        self.height = f64::from(height);

        let center = (self.width / 2.0, self.height / 2.0);
        let word = WORDS.choose(&mut rng).copied().unwrap_or(WORDS[0]);
        self.spell(word, center, &mut rng);

        for _ in 0..25 {
            let x = center.0 + rng.gen_range(-15.0..15.0);
            let y = center.1 + rng.gen_range(-8.0..8.0);
            self.particles.push(Particle::spark(x, y, &mut rng));
        }

        tracing::debug!(word, particles = self.particles.len(), "celebration started");
    }

    fn spell<R: Rng>(&mut self, word: &str, center: (f64, f64), rng: &mut R) {
        let span = (word.chars().count() as f64 - 1.0) * LETTER_SPACING;
        let left = center.0 - span / 2.0;
        let row = center.1 - 2.0;

        for (i, ch) in word.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            let to = (left + i as f64 * LETTER_SPACING, row);
            let from = (
                center.0 + rng.gen_range(-10.0..10.0),
                center.1 + rng.gen_range(-5.0..5.0),
            );
            self.particles.push(Particle::letter(from, to, ch, rng));
        }
    }

    pub fn stop(&mut self) {
        self.is_active = false;
        self.particles.clear();
    }

    /// Steps the animation by `dt` of wall time
    pub fn update(&mut self, dt: Duration) {
        if !self.is_active {
            return;
        }

        self.elapsed += dt;
        if self.elapsed >= self.duration {
            self.stop();
            return;
        }

        let step = dt.as_secs_f64();
        let (width, height) = (self.width, self.height);
        self.particles.retain_mut(|particle| {
            let alive = particle.update(step);
            if particle.is_letter {
                return alive;
            }
            let margin = 5.0;
            let off_screen =
                particle.y > height + margin || particle.x < -margin || particle.x > width + margin;
            alive && !off_screen
        });
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}
