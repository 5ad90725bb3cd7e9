//! Play sounds and music files.
//!
//! All loaded sounds are registered in an [`AudioSession`] by their logical name.
//! The session has two independent ways of silencing them:
//!
//! - [`AudioSession::pause_all`] and [`AudioSession::resume_all`] suspend the whole output device, used when the game is hidden.
//! - [`AudioSession::pause_playing`] and [`AudioSession::resume_paused`] pause the individual sounds, used by the pause overlay.

use hashbrown::HashMap;
use kira::{
    manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings},
    sound::{
        static_sound::{StaticSoundData, StaticSoundHandle},
        PlaybackState,
    },
    tween::Tween,
};
use smallvec::SmallVec;
use smol_str::SmolStr;

use crate::error::{Error, Result};

/// Playback state of a single playing instance of a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum VoiceState {
    /// Audible.
    Playing,
    /// Paused, can be resumed.
    Paused,
    /// Finished or stopped, can't be resumed.
    Stopped,
}

/// Single playing instance of a sound.
pub trait Voice {
    /// Pause the playback.
    fn pause(&mut self);

    /// Continue the playback after a pause.
    fn resume(&mut self);

    /// Current playback state.
    fn state(&self) -> VoiceState;
}

/// Device sounds are played on.
pub trait AudioBackend {
    /// Decoded sound data.
    type Clip;

    /// Start playing a sound.
    ///
    /// # Errors
    ///
    /// - When the backend can't play anything.
    fn play(&mut self, clip: &Self::Clip, volume: f32, looping: bool) -> Result<Box<dyn Voice>>;

    /// Suspend all output.
    fn pause_all(&mut self);

    /// Continue all output after a [`Self::pause_all`].
    fn resume_all(&mut self);
}

/// Loaded sound with all its playing instances.
struct SoundHandle<C> {
    /// Decoded sound data.
    clip: C,
    /// Instances started from this sound that haven't finished yet.
    voices: SmallVec<[Box<dyn Voice>; 2]>,
    /// Volume of the last playback.
    volume: f32,
    /// Whether the last playback loops.
    looping: bool,
}

impl<C> SoundHandle<C> {
    /// Whether any instance is audible.
    fn is_playing(&self) -> bool {
        self.voices
            .iter()
            .any(|voice| voice.state() == VoiceState::Playing)
    }

    /// Whether any instance is paused.
    fn is_paused(&self) -> bool {
        self.voices
            .iter()
            .any(|voice| voice.state() == VoiceState::Paused)
    }
}

/// Registry of all sounds of the game.
pub struct AudioSession<B: AudioBackend> {
    /// Device to play sounds on.
    backend: B,
    /// Sounds by logical name.
    sounds: HashMap<SmolStr, SoundHandle<B::Clip>>,
    /// Whether the output device is not suspended.
    is_active: bool,
}

impl<B: AudioBackend> AudioSession<B> {
    /// Create an empty active session.
    #[inline]
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            sounds: HashMap::new(),
            is_active: true,
        }
    }

    /// Register a loaded sound under a logical name.
    ///
    /// Registering the same name twice replaces the sound, instances of the old sound keep playing.
    pub fn register(&mut self, name: &str, clip: B::Clip) {
        log::debug!("Registering sound '{name}'");

        self.sounds.insert(
            name.into(),
            SoundHandle {
                clip,
                voices: SmallVec::new(),
                volume: 1.0,
                looping: false,
            },
        );
    }

    /// Whether a sound with the name is registered.
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.sounds.contains_key(name)
    }

    /// Play a registered sound.
    ///
    /// Unknown sounds and backends that can't play are silent, a warning is logged.
    ///
    /// # Arguments
    ///
    /// * `name` - Logical name of the sound.
    /// * `volume` - Volume multiplication factor in the range `0.0..=1.0`.
    /// * `looping` - Whether the whole sound repeats forever.
    pub fn play(&mut self, name: &str, volume: f32, looping: bool) {
        let Some(sound) = self.sounds.get_mut(name) else {
            log::warn!("Can't play unknown sound '{name}'");

            return;
        };

        // Forget instances that can't be resumed anymore
        sound
            .voices
            .retain(|voice| voice.state() != VoiceState::Stopped);

        let volume = volume.clamp(0.0, 1.0);
        sound.volume = volume;
        sound.looping = looping;

        match self.backend.play(&sound.clip, volume, looping) {
            Ok(voice) => sound.voices.push(voice),
            Err(err) => log::warn!("Can't play sound '{name}': {err}"),
        }
    }

    /// Suspend the output device.
    ///
    /// Does nothing when already suspended, the state of the individual sounds is untouched.
    pub fn pause_all(&mut self) {
        if !self.is_active {
            return;
        }

        log::debug!("Suspending all audio");

        self.backend.pause_all();
        self.is_active = false;
    }

    /// Resume the output device after [`Self::pause_all`].
    ///
    /// Does nothing when already active.
    pub fn resume_all(&mut self) {
        if self.is_active {
            return;
        }

        log::debug!("Resuming all audio");

        self.backend.resume_all();
        self.is_active = true;
    }

    /// Suspend or resume the output device when the game becomes hidden or visible.
    #[inline]
    pub fn visibility_changed(&mut self, hidden: bool) {
        if hidden {
            self.pause_all();
        } else {
            self.resume_all();
        }
    }

    /// Pause every sound instance that's currently playing.
    pub fn pause_playing(&mut self) {
        for voice in self.sounds.values_mut().flat_map(|sound| &mut sound.voices) {
            if voice.state() == VoiceState::Playing {
                voice.pause();
            }
        }
    }

    /// Resume every sound instance that's currently paused.
    pub fn resume_paused(&mut self) {
        for voice in self.sounds.values_mut().flat_map(|sound| &mut sound.voices) {
            if voice.state() == VoiceState::Paused {
                voice.resume();
            }
        }
    }

    /// Whether the output device is not suspended.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }

    /// Whether any instance of the sound is audible.
    #[inline]
    #[must_use]
    pub fn is_playing(&self, name: &str) -> bool {
        self.sounds.get(name).is_some_and(SoundHandle::is_playing)
    }

    /// Whether any instance of the sound is paused.
    #[inline]
    #[must_use]
    pub fn is_paused(&self, name: &str) -> bool {
        self.sounds.get(name).is_some_and(SoundHandle::is_paused)
    }

    /// Volume and looping of the last playback of a sound.
    #[inline]
    #[must_use]
    pub fn playback_settings(&self, name: &str) -> Option<(f32, bool)> {
        self.sounds
            .get(name)
            .map(|sound| (sound.volume, sound.looping))
    }

    /// Device the sounds are played on.
    #[inline]
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }
}

/// Sound backend playing through the default audio device with `kira`.
pub struct KiraBackend {
    /// Manager of the device, `None` when no device could be opened.
    manager: Option<AudioManager<DefaultBackend>>,
}

impl KiraBackend {
    /// Open the default audio device.
    ///
    /// When no device can be opened a warning is logged and the backend will be silent.
    #[must_use]
    pub fn new() -> Self {
        match AudioManager::new(AudioManagerSettings::default()) {
            Ok(manager) => Self {
                manager: Some(manager),
            },
            Err(err) => {
                log::warn!(
                    "{}",
                    Error::UnsupportedEnvironment(format!(
                        "no audio device could be opened, playing without sound: {err}"
                    ))
                );

                Self::disabled()
            }
        }
    }

    /// Backend that never plays anything.
    #[inline]
    #[must_use]
    pub const fn disabled() -> Self {
        Self { manager: None }
    }

    /// Whether a device is open.
    #[inline]
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.manager.is_some()
    }
}

impl Default for KiraBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for KiraBackend {
    type Clip = StaticSoundData;

    fn play(&mut self, clip: &StaticSoundData, volume: f32, looping: bool) -> Result<Box<dyn Voice>> {
        let Some(manager) = &mut self.manager else {
            return Err(Error::UnsupportedEnvironment(
                "no audio device available".to_owned(),
            ));
        };

        // Set the volume
        let mut settings = clip.settings.clone().volume(f64::from(volume));

        // Loop the whole sound
        if looping {
            settings = settings.loop_region(..);
        }

        let handle = manager
            .play(clip.with_settings(settings))
            .map_err(|err| Error::UnsupportedEnvironment(format!("can't play sound: {err:?}")))?;

        Ok(Box::new(KiraVoice(handle)))
    }

    fn pause_all(&mut self) {
        if let Some(manager) = &mut self.manager {
            // Sounds keep their own state, only the output is silenced
            manager.main_track().set_volume(0.0_f64, Tween::default());
        }
    }

    fn resume_all(&mut self) {
        if let Some(manager) = &mut self.manager {
            manager.main_track().set_volume(1.0_f64, Tween::default());
        }
    }
}

/// Playing instance on the `kira` backend.
struct KiraVoice(StaticSoundHandle);

impl Voice for KiraVoice {
    fn pause(&mut self) {
        self.0.pause(Tween::default());
    }

    fn resume(&mut self) {
        self.0.resume(Tween::default());
    }

    fn state(&self) -> VoiceState {
        match self.0.state() {
            PlaybackState::Paused | PlaybackState::Pausing => VoiceState::Paused,
            PlaybackState::Stopped | PlaybackState::Stopping => VoiceState::Stopped,
            _ => VoiceState::Playing,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::{AudioBackend, AudioSession, KiraBackend, Voice, VoiceState};
    use crate::error::Result;

    /// Voice with a state that's shared with the test.
    pub(crate) struct MockVoice(Rc<Cell<VoiceState>>);

    impl Voice for MockVoice {
        fn pause(&mut self) {
            self.0.set(VoiceState::Paused);
        }

        fn resume(&mut self) {
            self.0.set(VoiceState::Playing);
        }

        fn state(&self) -> VoiceState {
            self.0.get()
        }
    }

    /// Backend counting the calls made to it.
    #[derive(Default)]
    pub(crate) struct MockBackend {
        pub(crate) pauses: usize,
        pub(crate) resumes: usize,
        /// States of every voice started, in order.
        pub(crate) voices: Vec<Rc<Cell<VoiceState>>>,
    }

    impl AudioBackend for MockBackend {
        type Clip = ();

        fn play(&mut self, _clip: &(), _volume: f32, _looping: bool) -> Result<Box<dyn Voice>> {
            let state = Rc::new(Cell::new(VoiceState::Playing));
            self.voices.push(Rc::clone(&state));

            Ok(Box::new(MockVoice(state)))
        }

        fn pause_all(&mut self) {
            self.pauses += 1;
        }

        fn resume_all(&mut self) {
            self.resumes += 1;
        }
    }

    fn session() -> AudioSession<MockBackend> {
        let mut session = AudioSession::new(MockBackend::default());
        session.register("bgm", ());
        session.register("pause", ());

        session
    }

    #[test]
    fn global_pause_is_idempotent() {
        let mut session = session();

        session.pause_all();
        session.pause_all();
        assert!(!session.is_active());
        assert_eq!(session.backend().pauses, 1);

        session.resume_all();
        session.resume_all();
        assert!(session.is_active());
        assert_eq!(session.backend().resumes, 1);
    }

    #[test]
    fn resume_without_pause_does_nothing() {
        let mut session = session();

        session.visibility_changed(false);
        assert_eq!(session.backend().resumes, 0);

        session.visibility_changed(true);
        session.visibility_changed(false);
        assert_eq!(session.backend().pauses, 1);
        assert_eq!(session.backend().resumes, 1);
    }

    #[test]
    fn global_pause_keeps_sound_state() {
        let mut session = session();
        session.play("bgm", 0.2, true);

        session.pause_all();
        assert!(session.is_playing("bgm"));
    }

    #[test]
    fn selective_pause_only_touches_playing() {
        let mut session = session();
        session.play("bgm", 0.2, true);
        session.play("pause", 0.5, false);

        // The effect finished on its own
        session.backend().voices[1].set(VoiceState::Stopped);

        session.pause_playing();
        assert!(session.is_paused("bgm"));
        assert_eq!(session.backend().voices[1].get(), VoiceState::Stopped);

        // Started while the others are paused
        session.play("pause", 0.5, false);

        session.resume_paused();
        assert!(session.is_playing("bgm"));
        assert_eq!(session.backend().voices[1].get(), VoiceState::Stopped);
        assert_eq!(session.backend().voices[2].get(), VoiceState::Playing);
    }

    #[test]
    fn unknown_sound_is_silent() {
        let mut session = session();
        session.play("missing", 1.0, false);

        assert!(session.backend().voices.is_empty());
        assert!(!session.is_playing("missing"));
    }

    #[test]
    fn playback_settings_are_remembered() {
        let mut session = session();
        session.play("bgm", 3.0, true);

        assert_eq!(session.playback_settings("bgm"), Some((1.0, true)));
        assert_eq!(session.playback_settings("missing"), None);
    }

    #[test]
    fn disabled_kira_backend_is_silent() {
        let mut session = AudioSession::new(KiraBackend::disabled());
        assert!(!session.backend().is_enabled());

        session.pause_all();
        session.resume_all();
        assert!(session.is_active());
    }
}
