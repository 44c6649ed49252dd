use core::fmt;

// -----------------------------------------------------------------------------
// Field

/// Selects one field of type `V` inside an owner of type `T`.
///
/// Both accessors are plain function pointers, so a `Field` is `Copy`,
/// `Send` and `Sync` whatever `T` and `V` are.
///
/// # Examples
///
/// ```
/// use vc_meta::field;
/// use vc_meta::schema::Field;
///
/// struct Camera { zoom: f32 }
///
/// let zoom: Field<Camera, f32> = field!(Camera, zoom);
/// let mut camera = Camera { zoom: 1.0 };
///
/// *zoom.get_mut(&mut camera) = 2.0;
/// assert_eq!(*zoom.get(&camera), 2.0);
/// ```
pub struct Field<T, V> {
    get: fn(&T) -> &V,
    get_mut: fn(&mut T) -> &mut V,
}

impl<T, V> Field<T, V> {
    #[inline]
    pub const fn new(get: fn(&T) -> &V, get_mut: fn(&mut T) -> &mut V) -> Self {
        Self { get, get_mut }
    }

    #[inline(always)]
    pub fn get<'a>(&self, owner: &'a T) -> &'a V {
        (self.get)(owner)
    }

    #[inline(always)]
    pub fn get_mut<'a>(&self, owner: &'a mut T) -> &'a mut V {
        (self.get_mut)(owner)
    }
}

impl<T, V> Clone for Field<T, V> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T, V> Copy for Field<T, V> {}

impl<T, V> fmt::Debug for Field<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("owner", &core::any::type_name::<T>())
            .field("value", &core::any::type_name::<V>())
            .finish()
    }
}

/// Builds a [`Field`] from an owner type and a field name.
///
/// ```
/// # use vc_meta::field;
/// struct Sprite { visible: bool }
///
/// let visible = field!(Sprite, visible);
/// assert!(*visible.get(&Sprite { visible: true }));
/// ```
#[macro_export]
macro_rules! field {
    ($owner:ty, $($field:tt).+) => {
        $crate::schema::Field::<$owner, _>::new(
            |owner| &owner.$($field).+,
            |owner| &mut owner.$($field).+,
        )
    };
}
